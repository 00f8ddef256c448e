//! Request and response bodies.

use std::collections::BTreeMap;

use folio_core::{ChatOutcome, ChatResult, LocaleTag};
use serde::{Deserialize, Serialize};

/// Error body returned for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// `POST /api/chat` request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequestBody {
    /// Visitor message. Required; optional here so its absence is reported
    /// as a validation error rather than a deserialization failure.
    #[serde(default)]
    pub message: Option<String>,
    /// Portfolio section the widget was opened from.
    #[serde(default)]
    pub context: Option<String>,
}

/// `POST /api/chat` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponseBody {
    pub response: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ChatResult> for ChatResponseBody {
    fn from(result: ChatResult) -> Self {
        let (demo, reason, error) = match result.outcome {
            ChatOutcome::Generated | ChatOutcome::Degraded(_) => (None, None, None),
            ChatOutcome::Demo => (Some(true), None, None),
            ChatOutcome::Fallback(reason) => (Some(true), Some(reason.to_string()), None),
            ChatOutcome::Failed(kind) => (None, None, Some(kind.as_str().to_string())),
        };
        Self {
            success: result.is_success(),
            response: result.response_text,
            demo,
            reason,
            error,
        }
    }
}

/// `GET /api/health` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub inference_configured: bool,
    pub locales: Vec<LocaleTag>,
    /// Canned-reply topics per locale.
    pub topics: BTreeMap<String, Vec<String>>,
}
