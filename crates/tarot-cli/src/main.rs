//! TarotWhisper command-line front end.
//!
//! ## Usage
//!
//! ```bash
//! # List the available spreads
//! tarot spreads
//!
//! # Draw a three-card reading and stream its interpretation
//! tarot read --question "Should I take the job?" --spread three_card_time
//!
//! # Draw positions in a chosen order, reproducibly
//! tarot read -q "What now?" -s three_card_time --positions 3,1,2 --seed 42
//!
//! # Browse saved readings
//! tarot history list
//! tarot history show <id>
//!
//! # Configure your own OpenAI-compatible endpoint
//! tarot settings set --base-url https://api.openai.com/v1 --api-key sk-... --model gpt-4o
//! tarot settings test
//! ```

mod commands;
mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::Context;

#[derive(Debug, Parser)]
#[command(name = "tarot")]
#[command(about = "Draw tarot spreads and stream an AI interpretation")]
struct Cli {
    /// Directory holding local_storage.json
    #[arg(long, global = true, env = "TAROT_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Base URL of the local proxy serving the default configuration
    #[arg(long, global = true, env = "TAROT_PROXY_URL", default_value = tarot_llm::DEFAULT_PROXY_URL)]
    proxy_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List spreads and their positions
    Spreads,

    /// Draw a reading and stream its interpretation
    Read(commands::read::ReadArgs),

    /// Browse or manage saved readings
    History {
        #[command(subcommand)]
        command: commands::history::HistoryCommand,
    },

    /// Show or change LLM settings
    Settings {
        #[command(subcommand)]
        command: commands::settings::SettingsCommand,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only the reading.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context::open(&cli.data_dir, &cli.proxy_url)?;

    match cli.command {
        Commands::Spreads => commands::spreads::run(&ctx),
        Commands::Read(args) => commands::read::run(&ctx, args).await,
        Commands::History { command } => commands::history::run(&ctx, command),
        Commands::Settings { command } => commands::settings::run(&ctx, command).await,
    }
}
