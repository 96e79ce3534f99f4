//! Placing wrapped lines inside a box.
//!
//! [`layout_lines`] takes visual lines from the wrapper and positions every
//! run inside a rectangle according to one of nine [`Justification`]s.
//!
//! # Example
//!
//! ```
//! use bots_tiles_render::text::{layout_lines, Justification, RenderedRun, TextStyle};
//! use bots_tiles_render::{Rect, Size};
//!
//! let run = RenderedRun {
//!     text: "Play".into(),
//!     style: TextStyle::default(),
//!     size: Size::new(40.0, 20.0),
//! };
//! let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
//! let block = layout_lines(&[vec![run]], Justification::Center, rect, 10.0);
//!
//! assert_eq!(block.placements()[0].rect, Rect::new(80.0, 40.0, 40.0, 20.0));
//! ```

use std::fmt;

use super::style::{RenderedRun, VisualLine};
use crate::types::{Point, Rect};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    /// Flush against the left margin.
    Left,
    /// Centered on the box.
    #[default]
    Center,
    /// Flush against the right margin.
    Right,
}

/// Vertical text alignment within a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    /// Flush against the top margin.
    Top,
    /// Centered on the box.
    #[default]
    Middle,
    /// Flush against the bottom margin.
    Bottom,
}

/// Where a text block is anchored inside its box: a 3×3 grid of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justification {
    TopLeft,
    MidTop,
    TopRight,
    MidLeft,
    #[default]
    Center,
    MidRight,
    BottomLeft,
    MidBottom,
    BottomRight,
}

impl Justification {
    /// All justifications, row by row.
    pub const ALL: [Justification; 9] = [
        Justification::TopLeft,
        Justification::MidTop,
        Justification::TopRight,
        Justification::MidLeft,
        Justification::Center,
        Justification::MidRight,
        Justification::BottomLeft,
        Justification::MidBottom,
        Justification::BottomRight,
    ];

    /// The horizontal component.
    pub fn horizontal(self) -> HorizontalAlign {
        match self {
            Justification::TopLeft | Justification::MidLeft | Justification::BottomLeft => {
                HorizontalAlign::Left
            }
            Justification::MidTop | Justification::Center | Justification::MidBottom => {
                HorizontalAlign::Center
            }
            Justification::TopRight | Justification::MidRight | Justification::BottomRight => {
                HorizontalAlign::Right
            }
        }
    }

    /// The vertical component.
    pub fn vertical(self) -> VerticalAlign {
        match self {
            Justification::TopLeft | Justification::MidTop | Justification::TopRight => {
                VerticalAlign::Top
            }
            Justification::MidLeft | Justification::Center | Justification::MidRight => {
                VerticalAlign::Middle
            }
            Justification::BottomLeft | Justification::MidBottom | Justification::BottomRight => {
                VerticalAlign::Bottom
            }
        }
    }

    /// Canonical lowercase name, e.g. `"midtop"`.
    pub fn name(self) -> &'static str {
        match self {
            Justification::TopLeft => "topleft",
            Justification::MidTop => "midtop",
            Justification::TopRight => "topright",
            Justification::MidLeft => "midleft",
            Justification::Center => "center",
            Justification::MidRight => "midright",
            Justification::BottomLeft => "bottomleft",
            Justification::MidBottom => "midbottom",
            Justification::BottomRight => "bottomright",
        }
    }

    /// Look up a justification by name.
    ///
    /// Case, spaces, `-` and `_` are ignored, so `"top_left"` and
    /// `"Top Left"` both name [`Justification::TopLeft`].
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let key = match key.as_str() {
            "centre" => "center",
            other => other,
        };
        Self::ALL.into_iter().find(|j| j.name() == key)
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A run positioned inside the box.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub run: RenderedRun,
    /// Where the run is drawn; its size is the run's measured size.
    pub rect: Rect,
}

impl Placement {
    /// Top-left corner of the run.
    #[inline]
    pub fn origin(&self) -> Point {
        self.rect.origin
    }
}

/// Every run of a text block, positioned, in draw order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    placements: Vec<Placement>,
    line_count: usize,
}

impl TextBlock {
    /// The positioned runs.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of visual lines.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Check if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Smallest rectangle containing every placement.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.placements.first()?.rect;
        let (left, top, right, bottom) = self.placements.iter().fold(
            (first.left(), first.top(), first.right(), first.bottom()),
            |(l, t, r, b), p| {
                (
                    l.min(p.rect.left()),
                    t.min(p.rect.top()),
                    r.max(p.rect.right()),
                    b.max(p.rect.bottom()),
                )
            },
        );
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Vertical extent of all placements.
    pub fn content_height(&self) -> f32 {
        self.bounds().map_or(0.0, |bounds| bounds.height())
    }

    /// Horizontal extent of all placements.
    pub fn content_width(&self) -> f32 {
        self.bounds().map_or(0.0, |bounds| bounds.width())
    }
}

fn line_height(line: &VisualLine) -> f32 {
    line.iter().map(RenderedRun::height).fold(0.0, f32::max)
}

fn line_width(line: &VisualLine) -> f32 {
    line.iter().map(RenderedRun::width).sum()
}

/// Height of a block of lines: the sum of each line's tallest run.
pub fn block_height(lines: &[VisualLine]) -> f32 {
    lines.iter().map(line_height).sum()
}

/// Position every run of `lines` inside `rect`.
pub fn layout_lines(
    lines: &[VisualLine],
    justification: Justification,
    rect: Rect,
    margin: f32,
) -> TextBlock {
    let heights: Vec<f32> = lines.iter().map(line_height).collect();
    let tops = line_tops(&heights, justification.vertical(), rect, margin);

    let mut placements = Vec::with_capacity(lines.iter().map(Vec::len).sum());
    for ((line, height), top) in lines.iter().zip(&heights).zip(tops) {
        let width = line_width(line);
        let mut x = match justification.horizontal() {
            HorizontalAlign::Left => rect.left() + margin,
            HorizontalAlign::Center => rect.center().x - width / 2.0,
            HorizontalAlign::Right => rect.right() - margin - width,
        };

        for run in line {
            let y = top + (height - run.height()) / 2.0;
            placements.push(Placement {
                rect: Rect::from_origin_size((x, y), run.size),
                run: run.clone(),
            });
            x += run.width();
        }
    }

    TextBlock {
        placements,
        line_count: lines.len(),
    }
}

/// Top edge of every line.
///
/// Consecutive lines advance by the taller of the two, or by their average
/// when the block is centered, so mixed sizes keep even spacing.
fn line_tops(heights: &[f32], align: VerticalAlign, rect: Rect, margin: f32) -> Vec<f32> {
    let Some((&first, &last)) = heights.first().zip(heights.last()) else {
        return Vec::new();
    };
    let steps = heights.windows(2);

    match align {
        VerticalAlign::Top => {
            let mut top = rect.top() + margin;
            let mut tops = vec![top];
            for pair in steps {
                top += pair[0].max(pair[1]);
                tops.push(top);
            }
            tops
        }
        VerticalAlign::Middle => {
            let count = heights.len() as f32;
            let total: f32 = heights.iter().sum();
            let mut center = rect.center().y - total * (1.0 - 1.0 / count) / 2.0;
            let mut tops = vec![center - first / 2.0];
            for pair in steps {
                center += (pair[0] + pair[1]) / 2.0;
                tops.push(center - pair[1] / 2.0);
            }
            tops
        }
        VerticalAlign::Bottom => {
            let mut bottom = rect.bottom() - margin;
            let mut tops = vec![bottom - last];
            for pair in steps.rev() {
                bottom -= pair[0].max(pair[1]);
                tops.push(bottom - pair[0]);
            }
            tops.reverse();
            tops
        }
    }
}
