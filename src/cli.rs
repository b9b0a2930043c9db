//! Command-line interface for strictly_relay.

use clap::{Parser, Subcommand};

/// Strictly Relay - tic-tac-toe client for a WebSocket relay
#[derive(Parser, Debug)]
#[command(name = "strictly_relay")]
#[command(about = "Play tic-tac-toe through a relay server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Relay WebSocket URL (overrides STRICTLY_RELAY_URL and the config file)
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Connect without a UI and log every session change
    Watch {
        /// Request a game as soon as the connection is issued
        #[arg(long)]
        start: bool,
    },
}
