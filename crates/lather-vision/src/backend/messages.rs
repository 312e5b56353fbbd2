//! Messages-style JSON completion endpoint.

use std::time::Duration;

use lather_config::VisionConfig;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{VisionBackend, VisionRequest};
use crate::error::ClassifierError;

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: [ContentPart<'a>; 2],
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP backend for a messages-style vision endpoint.
#[derive(Clone)]
pub struct MessagesBackend {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_version: String,
    api_key: String,
}

impl std::fmt::Debug for MessagesBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagesBackend")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl MessagesBackend {
    /// Build a backend from configuration and a resolved API key.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::NotConfigured`] if `api_key` is empty, or
    /// [`ClassifierError::TransportFailure`] if the HTTP client cannot be built.
    pub fn new(config: &VisionConfig, api_key: impl Into<String>) -> Result<Self, ClassifierError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClassifierError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent("lather/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifierError::TransportFailure(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_version: config.api_version.clone(),
            api_key,
        })
    }

    fn body<'a>(&'a self, request: &VisionRequest<'a>) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: request.max_output_tokens,
            messages: [Message {
                role: "user",
                content: [
                    ContentPart::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type: request.image.media_type,
                            data: request.image.to_base64(),
                        },
                    },
                    ContentPart::Text {
                        text: request.prompt,
                    },
                ],
            }],
        }
    }
}

impl VisionBackend for MessagesBackend {
    async fn complete(&self, request: VisionRequest<'_>) -> Result<String, ClassifierError> {
        let body = self.body(&request);
        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            image_bytes = request.image.bytes.len(),
            "sending classification request"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassifierError::TransportFailure(e.to_string()))?;

        read_completion(resp).await
    }
}

/// Read the reply text out of a response.
///
/// # Errors
///
/// - body cannot be read → [`ClassifierError::TransportFailure`]
/// - JSON `error.message` payload, or a failure status →
///   [`ClassifierError::EndpointError`]
/// - anything else without reply text → [`ClassifierError::UnparseableResponse`]
pub(crate) async fn read_completion(resp: reqwest::Response) -> Result<String, ClassifierError> {
    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .map_err(|e| ClassifierError::TransportFailure(e.to_string()))?;
    parse_body(status, &body)
}

fn parse_body(status: StatusCode, body: &[u8]) -> Result<String, ClassifierError> {
    let parsed = serde_json::from_slice::<MessagesResponse>(body);

    match parsed {
        Ok(MessagesResponse {
            error: Some(error), ..
        }) => {
            tracing::warn!(%status, message = %error.message, "vision endpoint returned an error");
            Err(ClassifierError::EndpointError(error.message))
        }
        _ if !status.is_success() => {
            Err(ClassifierError::EndpointError(format!("HTTP {status}")))
        }
        Ok(response) => {
            let text = response
                .content
                .into_iter()
                .find_map(|block| block.text)
                .ok_or(ClassifierError::UnparseableResponse)?;
            tracing::debug!(reply = %text, "vision endpoint replied");
            Ok(text)
        }
        Err(error) => {
            tracing::debug!(%error, "vision reply is not the expected JSON");
            Err(ClassifierError::UnparseableResponse)
        }
    }
}
