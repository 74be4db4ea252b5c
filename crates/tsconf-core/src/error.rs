//! Error types for configuration resolution
//!
//! Problems found *in* configuration documents are reported as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s and never abort a call.
//! `TsconfError` is reserved for failures of the environment itself: host I/O
//! errors and patterns the regex engine refuses to compile.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configuration resolution
#[derive(Debug, Error)]
pub enum TsconfError {
    /// Configuration could not be located or loaded at all
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors reported by the host
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generated file-matching pattern was rejected by the regex engine
    #[error("Invalid file matching pattern '{pattern}': {source}")]
    PatternError {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Pattern,
    Internal,
}

impl TsconfError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TsconfError::ConfigError { .. } => ErrorKind::Config,
            TsconfError::IoError { .. } => ErrorKind::Io,
            TsconfError::PatternError { .. } => ErrorKind::Pattern,
            TsconfError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a pattern compilation error
    pub fn pattern_error(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::PatternError {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for TsconfError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            TsconfError::config_error("missing").kind(),
            ErrorKind::Config
        );
        assert_eq!(
            TsconfError::internal_error("boom").kind(),
            ErrorKind::Internal
        );

        let io = TsconfError::io_error(
            "/proj/src",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.kind(), ErrorKind::Io);
        assert!(io.to_string().contains("/proj/src"));
    }
}
