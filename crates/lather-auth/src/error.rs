use lather_store::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("account record for {identity} is malformed: {detail}")]
    MalformedAccount { identity: String, detail: String },

    #[error("random salt generation failed: {0}")]
    Entropy(String),

    #[error("API key store error: {0}")]
    KeyStore(String),
}
