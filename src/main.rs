//! Strictly Relay - tic-tac-toe client
//!
//! Plays through a WebSocket relay in the terminal, or follows a game headless.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use strictly_relay::cli::{Cli, Command};
use strictly_relay::{ClientConfig, ProtocolBridge, WebSocketConnector, headless, tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::resolve(cli.server_url, cli.config.as_deref())?;

    match cli.command {
        Command::Play => tui::run_tui(config).await,
        Command::Watch { start } => run_watch(config, start).await,
    }
}

/// Follow one game without a UI, logging to stderr.
async fn run_watch(config: ClientConfig, start: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting headless relay client");

    let mut bridge = ProtocolBridge::new(WebSocketConnector, config.server_url());
    let session = headless::run_headless(&mut bridge, start).await?;

    info!(
        status = %session.status(),
        winner = ?session.winner(),
        error = ?session.error(),
        "Headless session ended"
    );
    Ok(())
}
