//! Error types for huginnmd.
//!
//! Library crates use [`HuginnMdError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all huginnmd operations.
#[derive(Debug, thiserror::Error)]
pub enum HuginnMdError {
    /// A required entry field is empty or missing.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A timestamp that does not match the feed's fixed format.
    #[error("malformed date '{value}': expected YYYY-MM-DD HH:MM:SS +HHMM")]
    MalformedDate { value: String },

    /// A URL without a `scheme://` separator; no domain can be derived.
    #[error("malformed URL '{url}': missing '://' separator")]
    MalformedUrl { url: String },

    /// Feed or report text that cannot be interpreted.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HuginnMdError>;

impl HuginnMdError {
    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a malformed-date error carrying the offending value.
    pub fn malformed_date(value: impl Into<String>) -> Self {
        Self::MalformedDate {
            value: value.into(),
        }
    }

    /// Create a malformed-URL error carrying the offending URL.
    pub fn malformed_url(url: impl Into<String>) -> Self {
        Self::MalformedUrl { url: url.into() }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = HuginnMdError::validation("empty title");
        assert_eq!(err.to_string(), "validation error: empty title");

        let err = HuginnMdError::malformed_url("not-a-url");
        assert!(err.to_string().contains("not-a-url"));
        assert!(err.to_string().contains("://"));

        let err = HuginnMdError::malformed_date("yesterday");
        assert!(err.to_string().contains("yesterday"));
    }
}
