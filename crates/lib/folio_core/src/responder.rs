//! Chat response resolution.
//!
//! [`ChatResponder::respond`] turns a visitor message into a reply and never
//! fails: every backend problem degrades to a canned or apologetic reply.
//! The only error a caller sees is [`ChatError::MissingMessage`], raised when
//! building the [`ChatRequest`].
//!
//! Outcomes, from best to worst:
//!
//! - [`ChatOutcome::Generated`]: the model answered
//! - [`ChatOutcome::Degraded`]: the backend answered with a soft error
//! - [`ChatOutcome::Demo`]: no credential configured, canned reply
//! - [`ChatOutcome::Fallback`]: remote call failed, canned reply
//! - [`ChatOutcome::Failed`]: unexpected error caught at the boundary

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::apology;
use crate::backend::{HttpInferenceBackend, InferenceBackend, TransportError};
use crate::classify::{Classified, DegradedKind, FallbackReason, classify};
use crate::config::InferenceConfig;
use crate::deadline;
use crate::demo::DemoResponseTable;
use crate::locale::LocaleTag;
use crate::prompt::build_prompt;

/// Errors in the chat pipeline.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message is required")]
    MissingMessage,

    #[error(transparent)]
    Backend(TransportError),

    #[error("Responder panicked: {0}")]
    Panicked(String),
}

/// A visitor message and the UI section it was typed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    message: String,
    context: Option<String>,
}

impl ChatRequest {
    /// Rejects messages that are empty after trimming.
    pub fn new(message: impl Into<String>, context: Option<String>) -> Result<Self, ChatError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ChatError::MissingMessage);
        }
        Ok(Self { message, context })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

/// Category of an unexpected failure, inferred from its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Authentication,
    RateLimited,
    ServerError,
    Internal,
}

impl FailureKind {
    /// Inspect an error description for status-like hints.
    pub fn from_error_text(text: &str) -> Self {
        let lower = text.to_ascii_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));
        if has(&["401", "403", "unauthorized", "forbidden", "authentication"]) {
            FailureKind::Authentication
        } else if has(&["429", "rate limit", "too many requests"]) {
            FailureKind::RateLimited
        } else if has(&["500", "502", "503", "internal server", "server error"]) {
            FailureKind::ServerError
        } else {
            FailureKind::Internal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Authentication => "authentication_failed",
            FailureKind::RateLimited => "rate_limited",
            FailureKind::ServerError => "server_error",
            FailureKind::Internal => "internal_error",
        }
    }
}

/// How a reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOutcome {
    Generated,
    Degraded(DegradedKind),
    Demo,
    Fallback(FallbackReason),
    Failed(FailureKind),
}

impl ChatOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ChatOutcome::Generated => "generated",
            ChatOutcome::Degraded(_) => "degraded",
            ChatOutcome::Demo => "demo",
            ChatOutcome::Fallback(_) => "fallback",
            ChatOutcome::Failed(_) => "failed",
        }
    }
}

/// A reply ready for the visitor. `response_text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResult {
    pub response_text: String,
    pub outcome: ChatOutcome,
}

impl ChatResult {
    /// The backend was reached and answered, even if only with a soft error.
    pub fn succeeded_via_remote(&self) -> bool {
        matches!(self.outcome, ChatOutcome::Generated | ChatOutcome::Degraded(_))
    }

    /// The reply came from the canned table.
    pub fn is_demo(&self) -> bool {
        matches!(self.outcome, ChatOutcome::Demo | ChatOutcome::Fallback(_))
    }

    /// Why the canned table was used after a remote attempt.
    pub fn failure_reason(&self) -> Option<FallbackReason> {
        match self.outcome {
            ChatOutcome::Fallback(reason) => Some(reason),
            _ => None,
        }
    }

    /// False only when the boundary caught an unexpected error.
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, ChatOutcome::Failed(_))
    }
}

/// Resolves visitor messages into replies.
///
/// Holds no mutable state; one instance serves all concurrent requests.
pub struct ChatResponder {
    table: Arc<DemoResponseTable>,
    config: InferenceConfig,
    backend: Arc<dyn InferenceBackend>,
}

impl ChatResponder {
    pub fn new(
        table: Arc<DemoResponseTable>,
        config: InferenceConfig,
        backend: Arc<dyn InferenceBackend>,
    ) -> Self {
        Self {
            table,
            config,
            backend,
        }
    }

    /// Responder backed by the hosted HTTP API described by `config`.
    pub fn from_config(
        table: Arc<DemoResponseTable>,
        config: InferenceConfig,
    ) -> Result<Self, TransportError> {
        let backend = Arc::new(HttpInferenceBackend::new(&config)?);
        Ok(Self::new(table, config, backend))
    }

    pub fn table(&self) -> &DemoResponseTable {
        &self.table
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Produce a reply for `request` in `locale`.
    pub async fn respond(&self, request: &ChatRequest, locale: LocaleTag) -> ChatResult {
        let started = Instant::now();

        let result = match AssertUnwindSafe(self.resolve(request, locale))
            .catch_unwind()
            .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => self.failed(&e, locale),
            Err(payload) => {
                let e = ChatError::Panicked(panic_message(payload.as_ref()));
                self.failed(&e, locale)
            }
        };

        log_outcome(&result, locale, started.elapsed().as_millis() as u64);
        result
    }

    async fn resolve(
        &self,
        request: &ChatRequest,
        locale: LocaleTag,
    ) -> Result<ChatResult, ChatError> {
        if !self.config.is_configured() {
            return Ok(ChatResult {
                response_text: self.canned(request, locale),
                outcome: ChatOutcome::Demo,
            });
        }

        let prompt = build_prompt(request.message(), request.context());

        let attempt = deadline::race(self.config.timeout, self.backend.generate(&prompt)).await;
        let classified = match attempt {
            Err(_) => Classified::Fallback(FallbackReason::Timeout),
            Ok(Ok(raw)) => classify(&raw, &prompt),
            Ok(Err(
                e @ (TransportError::InvalidCredential(_) | TransportError::InvalidEndpoint(_)),
            )) => {
                return Err(ChatError::Backend(e));
            }
            Ok(Err(e)) => {
                warn!(error = %e, "generation request failed");
                Classified::Fallback(FallbackReason::FetchError)
            }
        };

        Ok(match classified {
            Classified::Generated(text) => ChatResult {
                response_text: text,
                outcome: ChatOutcome::Generated,
            },
            Classified::Degraded(kind) => ChatResult {
                response_text: apology::degraded(kind, locale).to_string(),
                outcome: ChatOutcome::Degraded(kind),
            },
            Classified::Fallback(reason) => ChatResult {
                response_text: self.canned(request, locale),
                outcome: ChatOutcome::Fallback(reason),
            },
        })
    }

    fn canned(&self, request: &ChatRequest, locale: LocaleTag) -> String {
        self.table
            .lookup(request.message(), request.context(), locale)
            .to_string()
    }

    fn failed(&self, e: &ChatError, locale: LocaleTag) -> ChatResult {
        let kind = FailureKind::from_error_text(&e.to_string());
        error!(error = %e, kind = kind.as_str(), "chat pipeline failed");
        ChatResult {
            response_text: apology::failure(kind, locale).to_string(),
            outcome: ChatOutcome::Failed(kind),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn log_outcome(result: &ChatResult, locale: LocaleTag, elapsed_ms: u64) {
    let outcome = result.outcome.label();
    match result.outcome {
        ChatOutcome::Generated | ChatOutcome::Demo => {
            info!(%locale, outcome, elapsed_ms, "chat reply resolved");
        }
        ChatOutcome::Degraded(kind) => {
            warn!(%locale, outcome, reason = kind.as_str(), elapsed_ms, "chat reply degraded");
        }
        ChatOutcome::Fallback(reason) => {
            warn!(%locale, outcome, %reason, elapsed_ms, "chat reply fell back to canned response");
        }
        ChatOutcome::Failed(kind) => {
            error!(%locale, outcome, reason = kind.as_str(), elapsed_ms, "chat reply failed");
        }
    }
}
