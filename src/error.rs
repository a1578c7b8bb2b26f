//! Error types and handling infrastructure for loglens.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! library error types, while the binary uses `anyhow` for top-level reporting.
//!
//! Only I/O and terminal failures are fatal. Out-of-range navigation, empty
//! searches and malformed JSON targets are handled inside the viewer and never
//! surface here as hard errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for loglens operations.
#[derive(Error, Debug)]
pub enum LogLensError {
    /// File system related errors (open, seek, read)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// Raw mode, screen or size query failures
    #[error("Terminal operation failed: {message}")]
    TerminalError { message: String },

    /// A line could not be parsed or formatted as JSON
    #[error("JSON formatting failed: {message}")]
    JsonError { message: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for loglens operations.
pub type Result<T> = std::result::Result<T, LogLensError>;

impl LogLensError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a TerminalError with a descriptive message
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::TerminalError {
            message: message.into(),
        }
    }

    /// Create a JsonError with a descriptive message
    pub fn json(message: impl Into<String>) -> Self {
        Self::JsonError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to LogLensError
impl From<std::io::Error> for LogLensError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

impl From<serde_json::Error> for LogLensError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err.to_string())
    }
}
