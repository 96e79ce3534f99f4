//! Error types for the render crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while parsing box markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A tag entry started with a letter that names no property.
    #[error("unknown tag property '{key}' on line {line}")]
    UnknownProperty { key: String, line: usize },

    /// A size entry was not a positive integer.
    #[error("invalid text size '{value}' on line {line}")]
    InvalidSize { value: String, line: usize },

    /// A color or font entry had no value after the colon.
    #[error("tag property '{key}' needs a value on line {line}")]
    MissingValue { key: String, line: usize },

    /// A color entry named no known color.
    #[error("unknown color '{name}' on line {line}")]
    UnknownColor { name: String, line: usize },
}

/// Errors produced by the text pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextError {
    /// The markup could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A single character does not fit on an empty line.
    #[error("'{text}' does not fit in a line budget of {budget}")]
    TooSmall { text: String, budget: f32 },
}

/// Errors produced while loading box images.
#[derive(Error, Debug)]
pub enum ImageError {
    /// The image file could not be read or decoded.
    #[error("failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Raw pixel data did not match the given dimensions.
    #[error("pixel buffer of {len} bytes does not match {width}x{height}")]
    InvalidPixels { width: u32, height: u32, len: usize },
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
