//! Storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from key-value persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value does not have the expected shape.
    #[error("corrupt value under '{key}': {detail}")]
    Corrupt { key: String, detail: String },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`StorageError::Corrupt`] for `key`.
    pub fn corrupt(key: &str, detail: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.to_string(),
            detail: detail.into(),
        }
    }
}
