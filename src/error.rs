//! Error types for Tierlog

use thiserror::Error;

/// Errors surfaced to callers of the logger
///
/// Write failures are absorbed by the logger itself, so in practice callers of
/// [`crate::Logger::log`] only ever see [`LogError::InvalidLevel`].
#[derive(Error, Debug)]
pub enum LogError {
    /// Level name outside the fixed debug/info/warning/error set
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Timestamp format that chrono cannot render or that contains `]`
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// General I/O error (directory creation at construction time)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for logger operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Short cause label for an I/O failure the writer absorbs
pub(crate) fn write_failure_cause(e: &std::io::Error) -> &'static str {
    use std::io::ErrorKind;

    match e.kind() {
        ErrorKind::StorageFull | ErrorKind::WriteZero => "disk full",
        ErrorKind::PermissionDenied => "permission denied",
        ErrorKind::NotFound => "not found",
        ErrorKind::IsADirectory => "path is a directory",
        _ => "write failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_invalid_level_message() {
        let err = LogError::InvalidLevel("fatal".to_string());
        assert_eq!(err.to_string(), "Invalid log level: fatal");
    }

    #[test]
    fn test_io_error_conversion() {
        let err: LogError = Error::new(ErrorKind::Other, "boom").into();
        assert!(matches!(err, LogError::Io(_)));
    }

    #[test]
    fn test_write_failure_cause() {
        let denied = Error::new(ErrorKind::PermissionDenied, "nope");
        assert_eq!(write_failure_cause(&denied), "permission denied");

        let zero = Error::new(ErrorKind::WriteZero, "zero");
        assert_eq!(write_failure_cause(&zero), "disk full");

        let other = Error::new(ErrorKind::Other, "other");
        assert_eq!(write_failure_cause(&other), "write failed");
    }
}
