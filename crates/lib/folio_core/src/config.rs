//! Remote inference configuration.

use std::env;
use std::time::Duration;

/// Hard deadline for a single remote generation call.
pub const INFERENCE_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Value shipped in `.env.example`; treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "your_huggingface_api_key_here";

/// Hosted text-generation model used when `INFERENCE_API_URL` is unset.
pub const DEFAULT_ENDPOINT_URL: &str =
    "https://api-inference.huggingface.co/models/microsoft/DialoGPT-medium";

/// Fixed generation parameters sent with every request.
pub mod generation {
    pub const MAX_LENGTH: u32 = 150;
    pub const TEMPERATURE: f32 = 0.7;
    pub const TOP_P: f32 = 0.9;
    pub const REPETITION_PENALTY: f32 = 1.1;
}

/// Settings for the remote text-generation backend.
#[derive(Clone, Debug)]
pub struct InferenceConfig {
    /// Text-generation endpoint receiving the POST.
    pub endpoint_url: String,
    /// Bearer token. Absent or placeholder disables remote calls.
    pub api_key: Option<String>,
    /// Deadline per call.
    pub timeout: Duration,
}

impl InferenceConfig {
    /// Config with the fixed timeout.
    pub fn new(endpoint_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            api_key,
            timeout: INFERENCE_TIMEOUT,
        }
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable              | Default                  |
    /// |-----------------------|--------------------------|
    /// | `INFERENCE_API_URL`   | [`DEFAULT_ENDPOINT_URL`] |
    /// | `HUGGINGFACE_API_KEY` | unset (demo mode)        |
    pub fn from_env() -> Self {
        Self::new(
            env::var("INFERENCE_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT_URL.into()),
            env::var("HUGGINGFACE_API_KEY").ok(),
        )
    }

    /// Whether a usable credential is present.
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    /// The credential, if it is usable.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT_URL, None)
    }
}
