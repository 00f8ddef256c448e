//! Interpretation of a single backend reply.
//!
//! Every [`RawResponse`] maps to exactly one [`Classified`] value. Nothing in
//! here fails: malformed input is itself an outcome.

use std::fmt;

use serde::Deserialize;

use crate::backend::RawResponse;
use crate::prompt::strip_prompt_echo;

/// Marker the hosted API puts in its error while a cold model spins up,
/// e.g. `"Model gpt2 is currently loading"`.
pub const MODEL_LOADING_MARKER: &str = "is currently loading";

/// Why a remote attempt was abandoned in favour of the canned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    HttpStatus(u16),
    NonJsonPayload,
    InvalidJson,
    Timeout,
    FetchError,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::HttpStatus(code) => write!(f, "HTTP {code}"),
            FallbackReason::NonJsonPayload => f.write_str("non-JSON payload"),
            FallbackReason::InvalidJson => f.write_str("invalid JSON"),
            FallbackReason::Timeout => f.write_str("timeout"),
            FallbackReason::FetchError => f.write_str("fetch error"),
        }
    }
}

/// Soft failures reported by a reachable backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedKind {
    ModelLoading,
    RateLimited,
    BackendError,
    EmptyGeneration,
}

impl DegradedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegradedKind::ModelLoading => "model_loading",
            DegradedKind::RateLimited => "rate_limited",
            DegradedKind::BackendError => "backend_error",
            DegradedKind::EmptyGeneration => "empty_generation",
        }
    }
}

/// Result of interpreting one backend reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Usable generated text, echo stripped and trimmed.
    Generated(String),
    /// Reachable backend, but no usable text.
    Degraded(DegradedKind),
    /// Serve the canned reply instead.
    Fallback(FallbackReason),
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: Option<String>,
}

/// The hosted API reports a single message, or a list for validation errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    fn into_text(self) -> String {
        match self {
            ErrorMessage::One(message) => message,
            ErrorMessage::Many(messages) => messages.join("; "),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Error { error: ErrorMessage },
    Many(Vec<Generation>),
    One(Generation),
}

fn looks_like_html(raw: &RawResponse) -> bool {
    let is_html_type = raw
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("text/html"));
    let head: String = raw
        .body
        .trim_start()
        .chars()
        .take(9)
        .collect::<String>()
        .to_ascii_lowercase();
    is_html_type || head.starts_with("<!doctype") || head.starts_with("<html")
}

fn classify_error(message: &str) -> DegradedKind {
    let lower = message.to_ascii_lowercase();
    if lower.contains(MODEL_LOADING_MARKER) {
        DegradedKind::ModelLoading
    } else if lower.contains("rate limit") || lower.contains("too many requests") {
        DegradedKind::RateLimited
    } else {
        DegradedKind::BackendError
    }
}

/// Classify `raw` as a reply to `prompt`.
pub fn classify(raw: &RawResponse, prompt: &str) -> Classified {
    if !(200..300).contains(&raw.status) {
        return Classified::Fallback(FallbackReason::HttpStatus(raw.status));
    }
    if looks_like_html(raw) {
        return Classified::Fallback(FallbackReason::NonJsonPayload);
    }
    let value: serde_json::Value = match serde_json::from_str(&raw.body) {
        Ok(v) => v,
        Err(_) => return Classified::Fallback(FallbackReason::InvalidJson),
    };

    let generated = match serde_json::from_value::<Payload>(value) {
        Ok(Payload::Error { error }) => {
            return Classified::Degraded(classify_error(&error.into_text()));
        }
        Ok(Payload::Many(items)) => items.into_iter().next().and_then(|g| g.generated_text),
        Ok(Payload::One(item)) => item.generated_text,
        // Valid JSON of an unknown shape carries no text.
        Err(_) => None,
    };

    match generated.as_deref().map(|text| strip_prompt_echo(text, prompt)) {
        Some(text) if !text.is_empty() => Classified::Generated(text.to_string()),
        _ => Classified::Degraded(DegradedKind::EmptyGeneration),
    }
}
