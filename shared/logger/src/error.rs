//! Error types for the logger.

use std::fmt;
use std::io;

/// Result alias used across the logging crate.
pub type Result<T> = std::result::Result<T, LoggingError>;

#[derive(Debug)]
pub enum LoggingError {
    /// The log file could not be opened or the writer thread not started.
    Io(io::Error),
    /// Invalid input, such as an unknown level name.
    Logging(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::Io(err) => write!(f, "log I/O failed: {}", err),
            LoggingError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::Io(err) => Some(err),
            LoggingError::Logging(_) => None,
        }
    }
}

impl From<io::Error> for LoggingError {
    fn from(err: io::Error) -> Self {
        LoggingError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_prefixes() {
        let err = LoggingError::Logging("unknown level 'loud'".to_string());
        assert_eq!(err.to_string(), "logging: unknown level 'loud'");

        let err = LoggingError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(err.to_string().starts_with("log I/O failed"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err: LoggingError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(err.source().is_some());
        assert!(matches!(err, LoggingError::Io(_)));
    }
}
