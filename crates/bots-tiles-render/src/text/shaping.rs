//! Measuring styled runs.
//!
//! Wrapping and layout only need to know how large a run of text is. The
//! [`TextMeasurer`] trait answers that question; [`FontSystem`](super::FontSystem)
//! answers it by shaping with real fonts and [`FixedAdvance`] with a fixed
//! advance per character, which needs no fonts at all.

use unicode_segmentation::UnicodeSegmentation;

use super::style::{RenderedRun, StyledRun, TextStyle};
use crate::types::Size;

/// Something that can measure a run of text in a given style.
pub trait TextMeasurer {
    /// Measure `text` as a single unwrapped line.
    fn measure(&mut self, text: &str, style: &TextStyle) -> Size;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn measure(&mut self, text: &str, style: &TextStyle) -> Size {
        (**self).measure(text, style)
    }
}

/// Measure a styled run, producing a rendered run of known size.
pub fn shape_run(measurer: &mut impl TextMeasurer, run: &StyledRun) -> RenderedRun {
    shape_text(measurer, &run.text, &run.style)
}

/// Measure `text` with `style`.
pub fn shape_text(measurer: &mut impl TextMeasurer, text: &str, style: &TextStyle) -> RenderedRun {
    RenderedRun {
        size: measurer.measure(text, style),
        text: text.to_string(),
        style: style.clone(),
    }
}

/// A measurer where every character has the same advance.
///
/// Width is `graphemes × size × advance_ratio` and height is
/// `size × line_height_ratio`. Spaces count as characters, so a lone space
/// has a width; callers that need empty runs to vanish pass empty text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    /// Advance of one character as a fraction of the font size.
    pub advance_ratio: f32,
    /// Line height as a multiple of the font size.
    pub line_height_ratio: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self {
            advance_ratio: 0.5,
            line_height_ratio: 1.2,
        }
    }
}

impl FixedAdvance {
    /// Create a measurer with the given ratios.
    pub fn new(advance_ratio: f32, line_height_ratio: f32) -> Self {
        Self {
            advance_ratio,
            line_height_ratio,
        }
    }
}

impl TextMeasurer for FixedAdvance {
    fn measure(&mut self, text: &str, style: &TextStyle) -> Size {
        let size = style.size as f32;
        let graphemes = text.graphemes(true).count() as f32;
        Size::new(
            graphemes * size * self.advance_ratio,
            size * self.line_height_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_advance() {
        let mut measurer = FixedAdvance::new(1.0, 1.5);
        let style = TextStyle::default().size(10);

        assert_eq!(measurer.measure("abcd", &style), Size::new(40.0, 15.0));
        assert_eq!(measurer.measure("", &style), Size::new(0.0, 15.0));
        // "é" written as e + combining accent is one grapheme.
        assert_eq!(measurer.measure("e\u{301}", &style).width, 10.0);
    }

    #[test]
    fn test_shape_run_keeps_text_and_style() {
        let mut measurer = FixedAdvance::default();
        let run = StyledRun::new("Play", TextStyle::default().size(20).bold(true));

        let rendered = shape_run(&mut measurer, &run);
        assert_eq!(rendered.text, "Play");
        assert_eq!(rendered.style, run.style);
        assert_eq!(rendered.size, Size::new(40.0, 24.0));
    }

    #[test]
    fn test_measure_through_reference() {
        let mut measurer = FixedAdvance::default();
        let mut by_ref = &mut measurer;
        let style = TextStyle::default();
        assert_eq!(by_ref.measure("ab", &style).width, 12.0);
    }
}
