use clap::{Parser, Subcommand};
use folio_core::LocaleTag;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Talk to the Folio portfolio assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the assistant a question.
    Ask {
        /// Message to send.
        message: String,

        /// Portfolio section the question relates to.
        #[arg(long)]
        context: Option<String>,

        /// Reply language.
        #[arg(long, default_value_t = LocaleTag::En)]
        lang: LocaleTag,

        /// Print the API response body instead of the reply text.
        #[arg(long)]
        json: bool,
    },

    /// Print the version.
    Version,
}
