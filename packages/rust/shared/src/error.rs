//! Error types for stepdoc.
//!
//! Library crates use [`StepdocError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all stepdoc operations.
#[derive(Debug, thiserror::Error)]
pub enum StepdocError {
    /// A description resource lacks a required metadata key.
    #[error("missing metadata key '{key}' in {resource:?}")]
    MissingMetadata { key: String, resource: PathBuf },

    /// A mandatory resource (description, run output) does not exist.
    #[error("required resource not found: {resource:?}")]
    ResourceNotFound { resource: PathBuf },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A configured resource pattern is not a valid glob.
    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StepdocError>;

impl StepdocError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// A required metadata key is absent from `resource`.
    pub fn missing_metadata(key: impl Into<String>, resource: impl Into<PathBuf>) -> Self {
        Self::MissingMetadata {
            key: key.into(),
            resource: resource.into(),
        }
    }

    /// A mandatory resource is absent.
    pub fn not_found(resource: impl Into<PathBuf>) -> Self {
        Self::ResourceNotFound {
            resource: resource.into(),
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
