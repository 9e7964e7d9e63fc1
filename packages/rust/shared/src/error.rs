//! Error types for Pressroom.
//!
//! Library crates use [`PressroomError`] via `thiserror`.
//! App crates (cli) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Pressroom operations.
#[derive(Debug, thiserror::Error)]
pub enum PressroomError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Content parsing or document shape error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Data validation error (schema mismatch, invalid format, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// HTML-to-Markdown or JSON conversion error.
    #[error("conversion error: {0}")]
    Conversion(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PressroomError>;

impl PressroomError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
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
        let err = PressroomError::config("missing output directory");
        assert_eq!(err.to_string(), "config error: missing output directory");

        let err = PressroomError::validation("article.json missing components");
        assert!(err.to_string().contains("missing components"));
    }
}
