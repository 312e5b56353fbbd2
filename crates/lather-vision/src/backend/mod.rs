//! The seam between the classifier and a vision vendor.

mod messages;

pub use messages::MessagesBackend;

use std::future::Future;

use crate::error::ClassifierError;
use crate::prepare::PreparedImage;

/// One completion request: a photo plus the instruction prompt.
#[derive(Debug, Clone, Copy)]
pub struct VisionRequest<'a> {
    pub image: &'a PreparedImage,
    pub prompt: &'a str,
    /// Upper bound on generated tokens; keeps the reply to the expected answer.
    pub max_output_tokens: u32,
}

/// A vision-capable completion service.
///
/// Implementations send exactly one request per call and return the raw
/// reply text. They map their own failures onto
/// [`ClassifierError::TransportFailure`], [`ClassifierError::EndpointError`]
/// or [`ClassifierError::UnparseableResponse`].
pub trait VisionBackend: Send + Sync {
    fn complete(
        &self,
        request: VisionRequest<'_>,
    ) -> impl Future<Output = Result<String, ClassifierError>> + Send;
}
