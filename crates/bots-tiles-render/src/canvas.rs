//! The drawing surface boxes paint onto.
//!
//! [`Canvas`] is the small set of primitives a box needs. A windowing
//! backend implements it on top of its renderer; [`DisplayList`] implements
//! it by recording every call, which is how boxes are drawn headless and in
//! tests.

use crate::box_image::BoxImage;
use crate::text::RenderedRun;
use crate::types::{Color, Point, RoundedRect};

/// A 2D surface that boxes draw onto.
///
/// Calls arrive in painter's order: later calls draw over earlier ones.
pub trait Canvas {
    /// Fill a rounded rectangle with a solid color.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color);

    /// Stroke the outline of a rounded rectangle.
    fn stroke_rounded_rect(&mut self, rect: RoundedRect, color: Color, width: f32);

    /// Draw an image scaled into `dest`, clipped to its rounded corners.
    fn draw_image(&mut self, image: &BoxImage, dest: RoundedRect);

    /// Draw a measured run of text with its top-left corner at `origin`.
    fn draw_text(&mut self, run: &RenderedRun, origin: Point);
}

/// A single recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRoundedRect {
        rect: RoundedRect,
        color: Color,
    },
    StrokeRoundedRect {
        rect: RoundedRect,
        color: Color,
        width: f32,
    },
    Image {
        width: u32,
        height: u32,
        dest: RoundedRect,
    },
    Text {
        run: RenderedRun,
        origin: Point,
    },
}

/// A canvas that records drawing calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all recorded commands, typically at the start of a frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// The text of every recorded run, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { run, .. } => Some(run.text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DisplayList {
    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        self.commands
            .push(DrawCommand::FillRoundedRect { rect, color });
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, color: Color, width: f32) {
        self.commands
            .push(DrawCommand::StrokeRoundedRect { rect, color, width });
    }

    fn draw_image(&mut self, image: &BoxImage, dest: RoundedRect) {
        self.commands.push(DrawCommand::Image {
            width: image.width(),
            height: image.height(),
            dest,
        });
    }

    fn draw_text(&mut self, run: &RenderedRun, origin: Point) {
        self.commands.push(DrawCommand::Text {
            run: run.clone(),
            origin,
        });
    }
}
