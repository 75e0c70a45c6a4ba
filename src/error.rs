//! Error types and handling infrastructure for iconpack.
//!
//! Library code returns [`PickerError`] through the crate-wide [`Result`] alias;
//! the binary wraps everything in `anyhow` at the top level.
//!
//! A missing store row is not an error (it means "system icons") and a failed
//! write is logged, not returned. The variants below are raised by the store
//! backends, the pack catalog, config loading and the terminal.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for iconpack operations.
#[derive(Error, Debug)]
pub enum PickerError {
    /// File system related errors (read/write failures, permission denied, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The external key-value store rejected or failed a request
    #[error("Store operation failed: {message}")]
    StoreError { message: String },

    /// A store uri could not be parsed
    #[error("Invalid store uri: {uri}")]
    InvalidUri { uri: String },

    /// Stored data could not be decoded
    #[error("Malformed store data at {path}: {message}")]
    MalformedStore { path: PathBuf, message: String },

    /// Pack directory missing or unreadable
    #[error("Pack catalog unavailable: {path}")]
    CatalogUnavailable { path: PathBuf },

    /// A pack manifest could not be parsed
    #[error("Invalid pack manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for iconpack operations.
pub type Result<T> = std::result::Result<T, PickerError>;

impl PickerError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a StoreError with a descriptive message
    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreError {
            message: message.into(),
        }
    }

    /// Create an InvalidManifest error for the given manifest path
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
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

impl From<std::io::Error> for PickerError {
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

impl From<tokio::task::JoinError> for PickerError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::other(format!("background task failed: {err}"))
    }
}
