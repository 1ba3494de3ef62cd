//! tictac - terminal Tic Tac Toe
//!
//! Plays against a friend or the heuristic computer, with a scripted chat
//! assistant for rules and hints.

#![warn(missing_docs)]

mod cli;
mod config;
mod repl;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(cli.mode, cli.seed);
    info!(?config, "Starting tictac");

    repl::run(&config).await
}
