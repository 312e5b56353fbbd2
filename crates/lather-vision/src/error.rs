//! Classifier error types.

use lather_ledger::LedgerError;
use thiserror::Error;

/// Why a classification produced no verdict.
///
/// Every variant is terminal for that call; nothing is retried. The caller
/// may resubmit (e.g., after the user retakes the photo).
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The bytes could not be decoded as an image. No request was sent.
    #[error("invalid image: could not decode photo")]
    InvalidImage,

    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// The endpoint answered with an error payload or a failure status.
    #[error("endpoint error: {0}")]
    EndpointError(String),

    /// The reply could not be mapped to a verdict.
    #[error("unparseable response from vision endpoint")]
    UnparseableResponse,

    /// Re-encoding the photo failed.
    #[error("image encoding failed: {0}")]
    Encode(String),

    /// The blocking image worker panicked or was cancelled.
    #[error("image worker failed: {0}")]
    Worker(String),

    /// No API key is available for the endpoint.
    #[error("vision endpoint is not configured; set LATHER_VISION__API_KEY or run `lather auth set-api-key`")]
    NotConfigured,

    /// The verdict was positive but recording today failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
