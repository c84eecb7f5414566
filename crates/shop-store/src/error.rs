//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing file.
    #[error("Failed to open store at {path}: {message}")]
    OpenError { path: PathBuf, message: String },

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform a store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// The backing file exists but is not a key-value document.
    #[error("Store file {0} is corrupt")]
    Corrupt(PathBuf),
}

impl StoreError {
    pub(crate) fn poisoned() -> Self {
        StoreError::StoreError("store lock poisoned".to_string())
    }
}
