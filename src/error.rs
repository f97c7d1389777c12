//! Error types for jetjoin.

use thiserror::Error;

/// The main error type for translation and driver operations.
#[derive(Debug, Error)]
pub enum JetError {
    /// A table group's join qualifiers could not be parenthesized.
    ///
    /// `group` is the whole comma-separated group, `segment` the piece of it
    /// (between two `join` keywords) where the expected qualifier was missing
    /// or unexpected.
    #[error("Invalid join syntax in '{}': could not parenthesize the join block at '{}'", .group.trim(), .segment.trim())]
    MalformedJoinChain { group: String, segment: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl JetError {
    /// Create a malformed join chain error for the given group and segment.
    pub fn malformed(group: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::MalformedJoinChain {
            group: group.into(),
            segment: segment.into(),
        }
    }

    /// Whether this error came out of the join parenthesizer.
    pub fn is_malformed_join(&self) -> bool {
        matches!(self, Self::MalformedJoinChain { .. })
    }
}

/// Result type alias for jetjoin operations.
pub type JetResult<T> = Result<T, JetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JetError::malformed(" A join B on x join C on y ", " B on x");
        assert_eq!(
            err.to_string(),
            "Invalid join syntax in 'A join B on x join C on y': could not parenthesize the join block at 'B on x'"
        );
        assert!(err.is_malformed_join());
    }

    #[test]
    fn test_config_error_is_not_malformed() {
        let err = JetError::Config("bad alias".into());
        assert!(!err.is_malformed_join());
        assert_eq!(err.to_string(), "Configuration error: bad alias");
    }
}
