//! Styled text values shared by the parser, shaper and layout engine.

use crate::types::{Color, Size};

/// The resolved style of a run of text.
///
/// Styles are plain values: a style continued across tag scopes is cloned,
/// never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Text color.
    pub color: Color,
    /// Font family name. `None` uses the default sans-serif face.
    pub font: Option<String>,
    /// Font size in pixels. Always greater than zero.
    pub size: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            color: Color::BLACK,
            font: None,
            size: 12,
        }
    }
}

impl TextStyle {
    /// Create a regular style with the given color and size.
    pub fn new(color: Color, size: u32) -> Self {
        Self {
            color,
            size,
            ..Self::default()
        }
    }

    /// Set bold.
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic.
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set the font family.
    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the size.
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
}

/// A contiguous span of text that shares one style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub style: TextStyle,
}

impl StyledRun {
    /// Create a new run.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A styled run after measurement.
///
/// The glyphs themselves are drawn by the canvas from the text and style.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRun {
    pub text: String,
    pub style: TextStyle,
    /// Measured size of the run.
    pub size: Size,
}

impl RenderedRun {
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }
}

/// One logical source line of styled runs.
pub type Line = Vec<StyledRun>;

/// One visual line of measured runs.
pub type VisualLine = Vec<RenderedRun>;
