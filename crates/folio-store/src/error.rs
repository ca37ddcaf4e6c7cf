//! Error types for folio persistence
//!
//! - [`KvError`]: the key/value backend could not be read or written
//! - [`StoreError`]: a project list operation failed

use std::path::PathBuf;

/// Key/value backend errors
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    /// Storage is disabled or otherwise unreachable
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Write would exceed the storage quota
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// IO error on a file-backed store
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backing file exists but is not a key/value map
    #[error("corrupt storage file {path}: {message}")]
    Corrupt { path: PathBuf, message: String },
}

impl KvError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create corrupt-file error for path
    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Project store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend failure
    #[error("storage error: {0}")]
    Kv(#[from] KvError),

    /// Persisted value is not a JSON array of records
    #[error("persisted projects could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// Records could not be encoded
    #[error("projects could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// Check if error is a decode failure of the persisted value
    #[inline]
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
