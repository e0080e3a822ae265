//! Error types for the fileseek plugin.
//!
//! This module defines the centralized error type [`FileSeekError`] and a type alias
//! [`Result`] used throughout the crate. All variants are derived with `thiserror`.
//!
//! None of these errors are ever shown to the user as a blocking condition: the
//! event handler and the worker log them and fall back to an empty result list.

use thiserror::Error;

/// The main error type for fileseek operations.
///
/// # Examples
///
/// ```
/// use fileseek::domain::FileSeekError;
///
/// fn check_root(exists: bool) -> Result<(), FileSeekError> {
///     if exists {
///         Ok(())
///     } else {
///         Err(FileSeekError::Search("search root is missing".to_string()))
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum FileSeekError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, typically raised while
    /// reading the search root or a theme file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file index could not answer a search request.
    #[error("Search error: {0}")]
    Search(String),

    /// Communication with the background worker failed.
    ///
    /// Raised when a message cannot be serialized for, or deserialized from,
    /// the worker thread.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for FileSeekError {
    fn from(e: serde_json::Error) -> Self {
        Self::Worker(e.to_string())
    }
}

/// A specialized `Result` type for fileseek operations.
pub type Result<T> = std::result::Result<T, FileSeekError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_with_context() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FileSeekError = io.into();
        assert_eq!(err.to_string(), "IO error: gone");
    }

    #[test]
    fn json_errors_become_worker_errors() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: FileSeekError = parse.into();
        assert!(matches!(err, FileSeekError::Worker(_)));
    }
}
