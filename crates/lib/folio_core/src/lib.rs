//! # folio_core
//!
//! Chat response pipeline for the Folio portfolio assistant.
//!
//! # Public API
//!
//! - [`responder::ChatResponder`]: resolves a visitor message into a reply
//! - [`demo::DemoResponseTable`]: localized canned replies
//! - [`config::InferenceConfig`]: remote text-generation settings
//! - [`deadline::race`]: bounded-time execution with loser cleanup

pub mod apology;
pub mod backend;
pub mod classify;
pub mod config;
pub mod deadline;
pub mod demo;
pub mod locale;
pub mod prompt;
pub mod responder;

pub use locale::LocaleTag;
pub use responder::{ChatError, ChatOutcome, ChatRequest, ChatResponder, ChatResult};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
