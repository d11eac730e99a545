//! Error types for prose-probe-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reasons a text cannot be scored.
///
/// Both variants are terminal: no metrics are computed once either fires.
/// The `Display` strings are part of the output contract and appear
/// verbatim in the `{"error": ...}` result object.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionError {
    /// The trimmed input is shorter than the minimum character count.
    #[error("Text too short for analysis")]
    TooShort,

    /// After normalization there are no sentences or too few words.
    #[error("Text too short for reliable analysis")]
    Unreliable,
}

/// Result type alias using [`DetectionError`].
pub type DetectionResult<T> = Result<T, DetectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_messages_are_literal() {
        assert_eq!(
            DetectionError::TooShort.to_string(),
            "Text too short for analysis"
        );
        assert_eq!(
            DetectionError::Unreliable.to_string(),
            "Text too short for reliable analysis"
        );
    }
}
