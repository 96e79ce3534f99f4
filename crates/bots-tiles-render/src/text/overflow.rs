//! What to do when text does not fit its box.
//!
//! [`resolve_overflow`] wraps and lays out parsed text, then applies an
//! [`OverflowPolicy`]: shrink the text, stretch the box down or right, or
//! let the text spill out.

use std::fmt;

use bots_tiles_core::PerfSpan;
use bots_tiles_core::logging::{span_names, targets};

use super::layout::{Justification, TextBlock, layout_lines};
use super::shaping::{TextMeasurer, shape_run};
use super::style::{Line, TextStyle, VisualLine};
use super::wrap::{unwrapped_lines, wrap_lines};
use crate::error::TextError;
use crate::types::Rect;

/// Lines shown instead of the text when it cannot be made to fit.
pub const TOO_SMALL_MESSAGE: [&str; 4] = ["Box", "is", "too", "small"];

/// Largest size text is grown to.
const MAX_TEXT_SIZE: u32 = 1024;

/// How a box reacts to text taller than its inner area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverflowPolicy {
    /// Shrink every run until the text fits.
    ResizeText,
    /// Make the box exactly as tall as its text.
    #[default]
    ResizeBoxDown,
    /// Widen the box until the text fits or no longer wraps.
    ResizeBoxRight,
    /// Leave text and box alone.
    AllowOverflow,
}

impl OverflowPolicy {
    /// All policies.
    pub const ALL: [OverflowPolicy; 4] = [
        OverflowPolicy::ResizeText,
        OverflowPolicy::ResizeBoxDown,
        OverflowPolicy::ResizeBoxRight,
        OverflowPolicy::AllowOverflow,
    ];

    /// Whether the policy changes the box rather than the text.
    pub fn resize_box_to_text(self) -> bool {
        matches!(self, OverflowPolicy::ResizeBoxDown | OverflowPolicy::ResizeBoxRight)
    }

    /// Canonical name, e.g. `"resize_box_down"`.
    pub fn name(self) -> &'static str {
        match self {
            OverflowPolicy::ResizeText => "resize_text",
            OverflowPolicy::ResizeBoxDown => "resize_box_down",
            OverflowPolicy::ResizeBoxRight => "resize_box_right",
            OverflowPolicy::AllowOverflow => "allow_overflow",
        }
    }

    /// Look up a policy by name, ignoring case and the separators ` `, `-`
    /// and `_`.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = |s: &str| -> String {
            s.chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .flat_map(char::to_lowercase)
                .collect()
        };
        let wanted = key(name);
        Self::ALL.into_iter().find(|p| key(p.name()) == wanted)
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Layout settings that take part in overflow resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OverflowSettings {
    pub policy: OverflowPolicy,
    pub justification: Justification,
    /// Space kept free between the box edge and the text.
    pub margin: f32,
    /// Wrap lines to the box width.
    pub wrap: bool,
    /// With [`OverflowPolicy::ResizeText`], also grow text that is shorter
    /// than the box.
    pub grow_text_to_fit: bool,
    /// Style of the placeholder shown when text cannot fit.
    pub placeholder_style: TextStyle,
}

impl Default for OverflowSettings {
    fn default() -> Self {
        Self {
            policy: OverflowPolicy::default(),
            justification: Justification::default(),
            margin: 10.0,
            wrap: true,
            grow_text_to_fit: false,
            placeholder_style: TextStyle::default(),
        }
    }
}

/// Text laid out to its final box.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Visual lines after wrapping at the final sizes.
    pub lines: Vec<VisualLine>,
    /// Every run positioned inside `rect`.
    pub block: TextBlock,
    /// The box rectangle, possibly resized.
    pub rect: Rect,
    /// The text could not fit and the placeholder is shown instead.
    pub too_small: bool,
}

impl Resolution {
    fn new(lines: Vec<VisualLine>, rect: Rect, settings: &OverflowSettings) -> Self {
        let block = layout_lines(&lines, settings.justification, rect, settings.margin);
        Self {
            lines,
            block,
            rect,
            too_small: false,
        }
    }
}

/// Wrap, lay out and fit `parsed` text into `rect`.
pub fn resolve_overflow(
    measurer: &mut impl TextMeasurer,
    parsed: &[Line],
    settings: &OverflowSettings,
    rect: Rect,
) -> Result<Resolution, TextError> {
    let _span = PerfSpan::new(span_names::OVERFLOW);
    let margin = settings.margin;

    match settings.policy {
        OverflowPolicy::AllowOverflow => {
            let lines = wrap_lines(measurer, parsed, rect.width() - 2.0 * margin, settings.wrap)?;
            Ok(Resolution::new(lines, rect, settings))
        }
        OverflowPolicy::ResizeBoxDown => {
            let lines = wrap_lines(measurer, parsed, rect.width() - 2.0 * margin, settings.wrap)?;
            let content = layout_lines(&lines, settings.justification, rect, margin).content_height();
            let resized = rect.with_height(content + 2.0 * margin);
            tracing::trace!(
                target: targets::OVERFLOW,
                from = rect.height(),
                to = resized.height(),
                "fitted box height to text"
            );
            Ok(Resolution::new(lines, resized, settings))
        }
        OverflowPolicy::ResizeBoxRight => widen_box(measurer, parsed, settings, rect),
        OverflowPolicy::ResizeText => resize_text(measurer, parsed, settings, rect),
    }
}

/// Widen the box until the text fits its height, never past the width the
/// text has with no wrapping at all.
fn widen_box(
    measurer: &mut impl TextMeasurer,
    parsed: &[Line],
    settings: &OverflowSettings,
    rect: Rect,
) -> Result<Resolution, TextError> {
    let margin = settings.margin;
    let available = rect.height() - 2.0 * margin;
    let natural = natural_width(measurer, parsed) + 2.0 * margin;
    let mut rect = rect;

    loop {
        let resolution = Resolution::new(
            wrap_lines(measurer, parsed, rect.width() - 2.0 * margin, settings.wrap)?,
            rect,
            settings,
        );
        let content = resolution.block.content_height();
        if content <= available || rect.width() >= natural {
            return Ok(resolution);
        }

        let estimate = if available > 0.0 {
            rect.width() * content / available
        } else {
            natural
        };
        let width = estimate.max(rect.width() + 1.0).min(natural);
        tracing::trace!(
            target: targets::OVERFLOW,
            from = rect.width(),
            to = width,
            "widening box"
        );
        rect = rect.with_width(width);
    }
}

/// Width of the widest logical line with no wrapping.
fn natural_width(measurer: &mut impl TextMeasurer, parsed: &[Line]) -> f32 {
    parsed
        .iter()
        .map(|line| line.iter().map(|run| shape_run(measurer, run).width()).sum::<f32>())
        .fold(0.0, f32::max)
}

/// Outcome of laying out text at one set of sizes.
enum Attempt {
    Fits(Resolution),
    Overflows,
}

fn attempt(
    measurer: &mut impl TextMeasurer,
    parsed: &[Line],
    settings: &OverflowSettings,
    rect: Rect,
) -> Result<Attempt, TextError> {
    let budget = rect.width() - 2.0 * settings.margin;
    let lines = match wrap_lines(measurer, parsed, budget, settings.wrap) {
        Ok(lines) => lines,
        Err(TextError::TooSmall { .. }) => return Ok(Attempt::Overflows),
        Err(err) => return Err(err),
    };

    let resolution = Resolution::new(lines, rect, settings);
    if resolution.block.content_height() <= rect.height() - 2.0 * settings.margin {
        Ok(Attempt::Fits(resolution))
    } else {
        Ok(Attempt::Overflows)
    }
}

/// Copy of `parsed` with every run's size changed by `delta`, or `None` if a
/// size would drop below 1. Growing also stops at `MAX_TEXT_SIZE`; shrinking
/// starts from any size.
fn resized(parsed: &[Line], delta: i64) -> Option<Vec<Line>> {
    parsed
        .iter()
        .map(|line| {
            line.iter()
                .map(|run| {
                    let size = u32::try_from(i64::from(run.style.size) + delta)
                        .ok()
                        .filter(|size| *size >= 1 && (delta <= 0 || *size <= MAX_TEXT_SIZE))?;
                    let mut run = run.clone();
                    run.style.size = size;
                    Some(run)
                })
                .collect::<Option<Line>>()
        })
        .collect()
}

fn resize_text(
    measurer: &mut impl TextMeasurer,
    parsed: &[Line],
    settings: &OverflowSettings,
    rect: Rect,
) -> Result<Resolution, TextError> {
    let has_runs = parsed.iter().any(|line| !line.is_empty());

    if let Attempt::Fits(mut best) = attempt(measurer, parsed, settings, rect)? {
        if settings.grow_text_to_fit && has_runs {
            let mut current = parsed.to_vec();
            while let Some(bigger) = resized(&current, 1) {
                match attempt(measurer, &bigger, settings, rect)? {
                    Attempt::Fits(resolution) => {
                        best = resolution;
                        current = bigger;
                    }
                    Attempt::Overflows => break,
                }
            }
        }
        return Ok(best);
    }

    let mut current = parsed.to_vec();
    while let Some(smaller) = resized(&current, -1) {
        if let Attempt::Fits(resolution) = attempt(measurer, &smaller, settings, rect)? {
            tracing::debug!(
                target: targets::OVERFLOW,
                steps = parsed_size(parsed) - parsed_size(&smaller),
                "shrank text to fit box"
            );
            return Ok(resolution);
        }
        current = smaller;
    }

    tracing::warn!(
        target: targets::OVERFLOW,
        width = rect.width(),
        height = rect.height(),
        "box is too small for its text"
    );
    let lines = unwrapped_lines(measurer, &TOO_SMALL_MESSAGE, &settings.placeholder_style);
    Ok(Resolution {
        too_small: true,
        ..Resolution::new(lines, rect, settings)
    })
}

/// Size of the first run, used for logging how far text shrank.
fn parsed_size(parsed: &[Line]) -> u32 {
    parsed
        .iter()
        .flatten()
        .next()
        .map_or(0, |run| run.style.size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{FixedAdvance, StyledRun};

    /// Characters are `size` wide and lines `size` tall.
    fn measurer() -> FixedAdvance {
        FixedAdvance::new(1.0, 1.0)
    }

    fn parsed(text: &str, size: u32) -> Vec<Line> {
        text.split('\n')
            .map(|line| vec![StyledRun::new(line, TextStyle::default().size(size))])
            .collect()
    }

    fn settings(policy: OverflowPolicy) -> OverflowSettings {
        OverflowSettings {
            policy,
            ..Default::default()
        }
    }

    fn sizes(resolution: &Resolution) -> Vec<u32> {
        resolution
            .lines
            .iter()
            .flatten()
            .map(|run| run.style.size)
            .collect()
    }

    #[test]
    fn test_policy_names() {
        for policy in OverflowPolicy::ALL {
            assert_eq!(OverflowPolicy::from_name(policy.name()), Some(policy));
        }
        assert_eq!(
            OverflowPolicy::from_name("Resize-Box-Right"),
            Some(OverflowPolicy::ResizeBoxRight)
        );
        assert_eq!(OverflowPolicy::from_name("shrink"), None);
        assert!(OverflowPolicy::ResizeBoxDown.resize_box_to_text());
        assert!(OverflowPolicy::ResizeBoxRight.resize_box_to_text());
        assert!(!OverflowPolicy::ResizeText.resize_box_to_text());
        assert!(!OverflowPolicy::AllowOverflow.resize_box_to_text());
    }

    #[test]
    fn test_allow_overflow_keeps_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 30.0);
        let text = parsed("aaaa bbbb cccc dddd", 10);
        let resolution =
            resolve_overflow(&mut measurer(), &text, &settings(OverflowPolicy::AllowOverflow), rect)
                .unwrap();
        assert_eq!(resolution.rect, rect);
        // "aaaa bbbb" is 90px, so every word gets its own line.
        assert_eq!(resolution.lines.len(), 4);
        assert!(!resolution.too_small);
    }

    #[test]
    fn test_resize_box_down_grows_and_shrinks() {
        let text = parsed("aaaa bbbb cccc dddd", 10);
        let s = settings(OverflowPolicy::ResizeBoxDown);

        let tall = Rect::new(5.0, 5.0, 100.0, 500.0);
        let resolution = resolve_overflow(&mut measurer(), &text, &s, tall).unwrap();
        // Four lines of 10px plus two 10px margins.
        assert_eq!(resolution.rect, Rect::new(5.0, 5.0, 100.0, 60.0));

        let short = Rect::new(5.0, 5.0, 100.0, 1.0);
        let resolution = resolve_overflow(&mut measurer(), &text, &s, short).unwrap();
        assert_eq!(resolution.rect.height(), 60.0);
        let bounds = resolution.block.bounds().unwrap();
        assert_eq!(bounds.top(), 15.0);
        assert_eq!(bounds.bottom(), 55.0);
    }

    #[test]
    fn test_resize_box_right_widens_until_fit() {
        // One word per line at width 60, but 20px of height fits two lines.
        let text = parsed("aaaa bbbb cccc dddd", 10);
        let rect = Rect::new(0.0, 0.0, 60.0, 40.0);
        let resolution =
            resolve_overflow(&mut measurer(), &text, &settings(OverflowPolicy::ResizeBoxRight), rect)
                .unwrap();
        assert!(resolution.rect.width() > 60.0);
        assert_eq!(resolution.rect.height(), 40.0);
        assert!(resolution.block.content_height() <= 20.0);
        assert!(resolution.rect.width() <= 190.0 + 20.0);
    }

    #[test]
    fn test_resize_box_right_stops_at_natural_width() {
        // Two logical lines never fit in 10px of height; the box stops growing
        // once nothing wraps.
        let text = parsed("aaaa bbbb\ncc", 10);
        let rect = Rect::new(0.0, 0.0, 50.0, 30.0);
        let resolution =
            resolve_overflow(&mut measurer(), &text, &settings(OverflowPolicy::ResizeBoxRight), rect)
                .unwrap();
        assert_eq!(resolution.rect.width(), 90.0 + 20.0);
        assert_eq!(resolution.lines.len(), 2);
    }

    #[test]
    fn test_resize_box_right_leaves_fitting_text() {
        let text = parsed("ab", 10);
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let resolution =
            resolve_overflow(&mut measurer(), &text, &settings(OverflowPolicy::ResizeBoxRight), rect)
                .unwrap();
        assert_eq!(resolution.rect, rect);
    }

    #[test]
    fn test_resize_text_shrinks() {
        // One word per line until size 8, so three lines have to fit in
        // 40px: size 13 is the first that does.
        let text = parsed("aaaa bbbb cccc", 20);
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        let resolution =
            resolve_overflow(&mut measurer(), &text, &settings(OverflowPolicy::ResizeText), rect)
                .unwrap();

        assert!(!resolution.too_small);
        assert!(resolution.block.content_height() <= 40.0);
        let sizes = sizes(&resolution);
        assert!(sizes.iter().all(|size| *size == 13));
    }

    #[test]
    fn test_resize_text_keeps_fitting_text() {
        let text = parsed("ab", 10);
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let resolution =
            resolve_overflow(&mut measurer(), &text, &settings(OverflowPolicy::ResizeText), rect)
                .unwrap();
        assert_eq!(sizes(&resolution), vec![10]);
        assert_eq!(resolution.rect, rect);
    }

    #[test]
    fn test_resize_text_grows_when_enabled() {
        let text = parsed("ab", 10);
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let s = OverflowSettings {
            grow_text_to_fit: true,
            ..settings(OverflowPolicy::ResizeText)
        };
        let resolution = resolve_overflow(&mut measurer(), &text, &s, rect).unwrap();
        // Two characters of size 40 fill the 80px line budget exactly.
        assert_eq!(sizes(&resolution), vec![40]);
    }

    #[test]
    fn test_resize_text_shrinks_oversized_text() {
        // 980px of inner height, so size 980 is the largest that fits.
        let text = parsed("a", 1100);
        let rect = Rect::new(0.0, 0.0, 2000.0, 1000.0);
        let resolution =
            resolve_overflow(&mut measurer(), &text, &settings(OverflowPolicy::ResizeText), rect)
                .unwrap();

        assert!(!resolution.too_small);
        assert_eq!(sizes(&resolution), vec![980]);
    }

    #[test]
    fn test_resize_text_growth_stops_at_max_size() {
        let text = parsed("a", MAX_TEXT_SIZE);
        let rect = Rect::new(0.0, 0.0, 5000.0, 5000.0);
        let s = OverflowSettings {
            grow_text_to_fit: true,
            ..settings(OverflowPolicy::ResizeText)
        };
        let resolution = resolve_overflow(&mut measurer(), &text, &s, rect).unwrap();
        assert_eq!(sizes(&resolution), vec![MAX_TEXT_SIZE]);
    }

    #[test]
    fn test_resize_text_too_small_placeholder() {
        let text = parsed("abc", 10);
        let rect = Rect::new(0.0, 0.0, 20.5, 20.5);
        let resolution =
            resolve_overflow(&mut measurer(), &text, &settings(OverflowPolicy::ResizeText), rect)
                .unwrap();

        assert!(resolution.too_small);
        let texts: Vec<&str> = resolution.block.placements().iter().map(|p| p.run.text.as_str()).collect();
        assert_eq!(texts, TOO_SMALL_MESSAGE);
    }

    #[test]
    fn test_resize_text_never_produces_zero_size() {
        for width in [21.0, 25.0, 40.0, 70.0] {
            let text = parsed("some words here\nand more", 30);
            let rect = Rect::new(0.0, 0.0, width, 30.0);
            let resolution =
                resolve_overflow(&mut measurer(), &text, &settings(OverflowPolicy::ResizeText), rect)
                    .unwrap();
            assert!(sizes(&resolution).iter().all(|size| *size > 0));
        }
    }

    #[test]
    fn test_too_small_propagates_for_box_policies() {
        let text = parsed("abc", 10);
        let rect = Rect::new(0.0, 0.0, 25.0, 100.0);
        for policy in [
            OverflowPolicy::AllowOverflow,
            OverflowPolicy::ResizeBoxDown,
            OverflowPolicy::ResizeBoxRight,
        ] {
            assert!(matches!(
                resolve_overflow(&mut measurer(), &text, &settings(policy), rect),
                Err(TextError::TooSmall { .. })
            ));
        }
    }

    #[test]
    fn test_resized_bounds() {
        let text = parsed("a", 1);
        assert!(resized(&text, -1).is_none());
        let bigger = resized(&text, 1).unwrap();
        assert_eq!(bigger[0][0].style.size, 2);
    }
}
