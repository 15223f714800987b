//! Store error types

use std::path::PathBuf;

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur while writing to a key-value medium
///
/// Reads never produce these; an unreadable value is treated as absent.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory contents could not be encoded for writing
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store configuration is unusable
    #[error("Invalid store configuration: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Creates an I/O error for a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Checks if this error came from the file system
    pub fn is_io_error(&self) -> bool {
        matches!(self, StoreError::Io { .. })
    }
}

impl From<StoreError> for PortError {
    fn from(error: StoreError) -> Self {
        let message = error.to_string();
        PortError::storage_with_source(message, error)
    }
}
