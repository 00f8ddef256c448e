//! # folio_api
//!
//! HTTP API library for Folio.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use folio_core::ChatResponder;
use folio_core::demo::DemoResponseTable;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::StartupError;
use crate::handlers::{chat, health};

/// Route paths served by [`router`].
pub mod routes {
    pub const POST_API_CHAT: &str = "/api/chat";
    pub const GET_API_HEALTH: &str = "/api/health";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Chat pipeline shared by all requests.
    pub responder: Arc<ChatResponder>,
}

impl AppState {
    /// Load the demo table and build the HTTP-backed responder.
    pub fn from_config(config: ApiConfig) -> Result<Self, StartupError> {
        let table = match &config.demo_responses_path {
            Some(path) => {
                info!(path = %path.display(), "loading demo responses");
                DemoResponseTable::from_path(path)?
            }
            None => DemoResponseTable::builtin()?,
        };
        let responder = ChatResponder::from_config(Arc::new(table), config.inference.clone())?;
        Ok(Self {
            config,
            responder: Arc::new(responder),
        })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
