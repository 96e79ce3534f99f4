//! Error types for boxes and screens.

use bots_tiles_render::{ImageError, ParseError, TextError};

/// Result type alias for box operations.
pub type Result<T> = std::result::Result<T, BoxError>;

/// Errors that can occur while configuring, laying out or drawing a box.
#[derive(Debug, thiserror::Error)]
pub enum BoxError {
    /// No attribute has this name.
    #[error("unknown box attribute '{0}'")]
    UnknownAttribute(String),

    /// The value has the wrong type or is out of range.
    #[error("invalid value for attribute '{attribute}': {message}")]
    InvalidValue { attribute: String, message: String },

    /// The box text could not be parsed or laid out.
    #[error(transparent)]
    Text(#[from] TextError),

    /// The box image could not be loaded.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// An attribute file is not valid TOML.
    #[error("invalid attribute file: {0}")]
    Config(#[from] toml::de::Error),
}

impl BoxError {
    /// Create an unknown attribute error.
    pub fn unknown_attribute(name: impl Into<String>) -> Self {
        Self::UnknownAttribute(name.into())
    }

    /// Create a value error.
    pub fn invalid_value(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

impl From<ParseError> for BoxError {
    fn from(err: ParseError) -> Self {
        Self::Text(TextError::Parse(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            BoxError::unknown_attribute("colour").to_string(),
            "unknown box attribute 'colour'"
        );
        assert_eq!(
            BoxError::invalid_value("margin", "must not be negative").to_string(),
            "invalid value for attribute 'margin': must not be negative"
        );
    }

    #[test]
    fn test_parse_error_is_text_error() {
        let err: BoxError = ParseError::UnknownColor {
            name: "blurple".into(),
            line: 1,
        }
        .into();
        assert!(matches!(err, BoxError::Text(TextError::Parse(_))));
        assert_eq!(err.to_string(), "unknown color 'blurple' on line 1");
    }
}
