//! API server configuration.

use std::path::PathBuf;

use folio_core::config::InferenceConfig;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// Remote text-generation settings.
    pub inference: InferenceConfig,
    /// Replacement for the built-in demo response table.
    pub demo_responses_path: Option<PathBuf>,
}
