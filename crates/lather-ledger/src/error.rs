use lather_core::CoreError;
use lather_store::StorageError;
use thiserror::Error;

/// Errors from ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Reading or persisting the ledger failed. No retry is attempted.
    #[error("ledger storage error: {0}")]
    Storage(#[from] StorageError),

    /// A calendar argument was out of range.
    #[error(transparent)]
    Calendar(#[from] CoreError),
}
