//! Remote text-generation backend.
//!
//! [`InferenceBackend`] is the seam between the responder and the network.
//! Implementations only move bytes: status, content type and body are handed
//! back untouched and interpreted by [`crate::classify`].

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{InferenceConfig, generation};

/// Transport-level failures talking to the backend.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid inference endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Authentication header rejected: {0}")]
    InvalidCredential(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Undecoded backend reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    /// A JSON reply with the given status.
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json".into()),
            body: body.into(),
        }
    }
}

/// Something that can turn a prompt into a raw generation reply.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<RawResponse, TransportError>;
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_length: u32,
    temperature: f32,
    top_p: f32,
    repetition_penalty: f32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_length: generation::MAX_LENGTH,
            temperature: generation::TEMPERATURE,
            top_p: generation::TOP_P,
            repetition_penalty: generation::REPETITION_PENALTY,
        }
    }
}

/// Hosted text-generation API reached over HTTPS with a bearer token.
///
/// The endpoint and key are only checked when a request is made, so a
/// responder without credentials never depends on them.
#[derive(Debug, Clone)]
pub struct HttpInferenceBackend {
    client: Client,
    endpoint_url: String,
    api_key: Option<String>,
}

impl HttpInferenceBackend {
    pub fn new(config: &InferenceConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self {
            client,
            endpoint_url: config.endpoint_url.clone(),
            api_key: config.api_key().map(str::to_string),
        })
    }

    fn endpoint(&self) -> Result<url::Url, TransportError> {
        url::Url::parse(&self.endpoint_url)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {e}", self.endpoint_url)))
    }

    fn authorization(&self) -> Result<HeaderValue, TransportError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TransportError::InvalidCredential("no API key configured".into()))?;
        HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| {
            TransportError::InvalidCredential("API key is not a valid header value".into())
        })
    }
}

#[async_trait]
impl InferenceBackend for HttpInferenceBackend {
    async fn generate(&self, prompt: &str) -> Result<RawResponse, TransportError> {
        let endpoint = self.endpoint()?;
        let authorization = self.authorization()?;

        debug!(%endpoint, prompt_len = prompt.len(), "sending generation request");

        let response = self
            .client
            .post(endpoint)
            .header(AUTHORIZATION, authorization)
            .json(&GenerationRequest {
                inputs: prompt,
                parameters: GenerationParameters::default(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TransportError::Connect(e.to_string())
                } else {
                    TransportError::Request(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status, body_len = body.len(), "generation response received");

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
