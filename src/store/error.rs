//! Error types for the store adapters.

use thiserror::Error;

/// Errors that can occur while writing the collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying file system rejected the write.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The collection could not be serialized.
    #[error("failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),

    /// The storage refused the write (e.g. quota exceeded).
    #[error("storage rejected write: {0}")]
    Rejected(String),
}

/// The blob under `key` could not be read back; the session starts empty.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("stored catalog under `{key}` is unreadable, starting empty: {reason}")]
pub struct CorruptStateWarning {
    pub key: String,
    pub reason: String,
}
