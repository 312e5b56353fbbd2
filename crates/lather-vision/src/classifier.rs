//! Photo → verdict → ledger.

use std::sync::Arc;

use lather_config::LatherConfig;
use lather_core::Verdict;
use lather_ledger::EventLedger;
use tokio::task::JoinHandle;

use crate::backend::{VisionBackend, VisionRequest};
use crate::error::ClassifierError;
use crate::interpret::interpret_response;
use crate::prepare::{ImageLimits, prepare};

/// Classifies photos and records positive verdicts in an [`EventLedger`].
///
/// One classification is one backend request. Nothing is retried.
pub struct ImageClassifier<B> {
    backend: B,
    ledger: Arc<EventLedger>,
    limits: ImageLimits,
    prompt: String,
    max_output_tokens: u32,
}

impl<B> std::fmt::Debug for ImageClassifier<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageClassifier")
            .field("limits", &self.limits)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish_non_exhaustive()
    }
}

impl<B: VisionBackend> ImageClassifier<B> {
    /// Create a classifier with default limits and the built-in prompt.
    #[must_use]
    pub fn new(backend: B, ledger: Arc<EventLedger>) -> Self {
        let defaults = lather_config::VisionConfig::default();
        Self {
            backend,
            ledger,
            limits: ImageLimits::default(),
            prompt: defaults.prompt,
            max_output_tokens: defaults.max_output_tokens,
        }
    }

    /// Create a classifier using the image and vision sections of `config`.
    #[must_use]
    pub fn from_config(config: &LatherConfig, backend: B, ledger: Arc<EventLedger>) -> Self {
        Self {
            backend,
            ledger,
            limits: ImageLimits::from(&config.image),
            prompt: config.vision.prompt.clone(),
            max_output_tokens: config.vision.max_output_tokens,
        }
    }

    #[must_use]
    pub const fn with_limits(mut self, limits: ImageLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>, max_output_tokens: u32) -> Self {
        self.prompt = prompt.into();
        self.max_output_tokens = max_output_tokens;
        self
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub const fn ledger(&self) -> &Arc<EventLedger> {
        &self.ledger
    }

    /// Classify one photo.
    ///
    /// Decoding and compression run on the blocking pool. On
    /// [`Verdict::Positive`] today is recorded in the ledger before this
    /// returns; any other outcome leaves the ledger untouched.
    ///
    /// # Errors
    ///
    /// - undecodable bytes → [`ClassifierError::InvalidImage`] (no request sent)
    /// - backend failures → [`ClassifierError::TransportFailure`] or
    ///   [`ClassifierError::EndpointError`]
    /// - reply with no recognizable answer → [`ClassifierError::UnparseableResponse`]
    /// - positive verdict that could not be persisted → [`ClassifierError::Ledger`]
    pub async fn classify(&self, raw: Vec<u8>) -> Result<Verdict, ClassifierError> {
        let limits = self.limits;
        let image = tokio::task::spawn_blocking(move || prepare(&raw, &limits))
            .await
            .map_err(|e| ClassifierError::Worker(e.to_string()))??;

        tracing::debug!(
            width = image.width,
            height = image.height,
            bytes = image.bytes.len(),
            quality = image.quality,
            "photo prepared"
        );

        let reply = self
            .backend
            .complete(VisionRequest {
                image: &image,
                prompt: &self.prompt,
                max_output_tokens: self.max_output_tokens,
            })
            .await?;

        let verdict = interpret_response(&reply)?;
        tracing::info!(verdict = verdict.as_str(), "photo classified");

        if verdict.is_positive() {
            self.ledger.record_today()?;
        }
        Ok(verdict)
    }
}

impl<B: VisionBackend + 'static> ImageClassifier<B> {
    /// Run [`ImageClassifier::classify`] on the runtime without waiting.
    ///
    /// The task holds its own reference to the classifier, so a positive
    /// verdict is still recorded if the returned handle is dropped.
    pub fn classify_detached(
        self: Arc<Self>,
        raw: Vec<u8>,
    ) -> JoinHandle<Result<Verdict, ClassifierError>> {
        tokio::spawn(async move { self.classify(raw).await })
    }
}
