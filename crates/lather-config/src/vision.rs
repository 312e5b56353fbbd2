//! Vision endpoint configuration.

use serde::{Deserialize, Serialize};

/// Instruction sent alongside every photo. The reply is constrained to two
/// tokens so the response parser has something stable to match.
pub const DEFAULT_PROMPT: &str = "Analyze this mobile photo and determine if someone is taking a \
shower. Look for: running water from showerhead, wet hair, steam/fog, shower curtain/door, \
bathroom tiles with water, soap/shampoo use, water droplets, person in shower position. \
Output only 'Showered' or 'Not Showered'.";

fn default_endpoint() -> String {
    String::from("https://api.anthropic.com/v1/messages")
}

fn default_model() -> String {
    String::from("claude-3-5-sonnet-20241022")
}

fn default_api_version() -> String {
    String::from("2023-06-01")
}

const fn default_max_output_tokens() -> u32 {
    100
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_prompt() -> String {
    String::from(DEFAULT_PROMPT)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VisionConfig {
    /// Messages endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Value of the `anthropic-version` header.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// API key. Empty means "look in the keyring / credentials file".
    #[serde(default)]
    pub api_key: String,

    /// Upper bound on generated tokens.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Whole-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Instruction prompt.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_version: default_api_version(),
            api_key: String::new(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
            prompt: default_prompt(),
        }
    }
}

impl VisionConfig {
    /// Check if an API key is present in configuration.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
