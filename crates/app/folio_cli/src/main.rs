// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use folio_api::models::ChatResponseBody;
use folio_core::config::InferenceConfig;
use folio_core::demo::DemoResponseTable;
use folio_core::{ChatRequest, ChatResponder, LocaleTag};

mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let _logger = logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Ask {
            message,
            context,
            lang,
            json,
        } => ask(message, context, lang, json)?,
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn ask(message: String, context: Option<String>, locale: LocaleTag, json: bool) -> Result<()> {
    let request = ChatRequest::new(message, context)?;

    let config = InferenceConfig::from_env();
    if !config.is_configured() {
        log::info!("HUGGINGFACE_API_KEY not set, answering from demo responses");
    }
    let table = Arc::new(DemoResponseTable::builtin()?);
    let responder = ChatResponder::from_config(table, config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(responder.respond(&request, locale));

    if json {
        println!("{}", serde_json::to_string(&ChatResponseBody::from(result))?);
    } else {
        println!("{}", result.response_text);
    }

    Ok(())
}
