//! Folio chat API server binary.
//!
//! Serves `POST /api/chat` for the portfolio's chat widget.

use std::path::PathBuf;

use clap::Parser;
use folio_api::config::ApiConfig;
use folio_core::config::InferenceConfig;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// CLI arguments for the API server.
///
/// Every flag falls back to an environment variable, which may come from `.env`:
///
/// | Variable              | Default                        |
/// |-----------------------|--------------------------------|
/// | `BIND_ADDR`           | `127.0.0.1:3100`               |
/// | `INFERENCE_API_URL`   | hosted text-generation model   |
/// | `HUGGINGFACE_API_KEY` | unset (demo mode)              |
/// | `DEMO_RESPONSES_PATH` | unset (built-in table)         |
#[derive(Parser, Debug)]
#[command(name = "folio_api_server", about = "Folio chat API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3100")]
    bind_addr: String,

    /// Text-generation endpoint.
    #[arg(
        long,
        env = "INFERENCE_API_URL",
        default_value = folio_core::config::DEFAULT_ENDPOINT_URL
    )]
    inference_url: String,

    /// Bearer token for the text-generation endpoint. Unset runs in demo mode.
    #[arg(long, env = "HUGGINGFACE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// JSON file replacing the built-in demo responses.
    #[arg(long, env = "DEMO_RESPONSES_PATH")]
    demo_responses: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,folio_api=debug,folio_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: args.bind_addr,
        inference: InferenceConfig::new(args.inference_url, args.api_key),
        demo_responses_path: args.demo_responses,
    };

    info!(
        bind_addr = %config.bind_addr,
        endpoint = %config.inference.endpoint_url,
        timeout_ms = config.inference.timeout.as_millis() as u64,
        "starting folio_api_server"
    );
    if !config.inference.is_configured() {
        warn!("no inference API key configured, serving demo responses only");
    }

    let state = folio_api::AppState::from_config(config.clone())?;
    let app = folio_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("ctrl-c received, shutting down");
            }
            shutdown.cancel();
        }
    });

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
