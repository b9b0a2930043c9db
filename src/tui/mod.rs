//! Terminal UI for Strictly Relay
//!
//! The bridge runs as its own task and publishes sessions through a watch
//! channel. Keys are read on a plain thread and forwarded as they arrive.

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::move_cursor;

use crate::bridge::{ProtocolBridge, UiIntent};
use crate::config::ClientConfig;
use crate::connection::WebSocketConnector;
use crate::session::Session;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, instrument, warn};

/// Run the TUI client against the configured relay.
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    // Log to a file so output does not tear the alternate screen
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %config.server_url(), "Starting Strictly Relay TUI");

    let mut bridge = ProtocolBridge::new(WebSocketConnector, config.server_url());
    let sessions = bridge.subscribe();
    bridge.connect()?;

    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    let bridge_task = tokio::spawn(async move { bridge.run(intent_rx).await });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, sessions, intent_tx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = bridge_task.await {
        warn!(error = %e, "Bridge task ended abnormally");
    }

    if let Err(err) = res {
        error!(error = ?err, "TUI loop error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Redraws on every session change and forwards key intents.
#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut sessions: watch::Receiver<Session>,
    intents: mpsc::UnboundedSender<UiIntent>,
) -> Result<()> {
    let mut app = App::new();
    let mut keys = spawn_key_reader();

    loop {
        app.update_session(sessions.borrow_and_update().clone());
        terminal.draw(|frame| ui::draw(frame, &app))?;

        tokio::select! {
            key = keys.recv() => {
                let Some(key) = key else {
                    warn!("Key reader stopped");
                    return Ok(());
                };
                let Some(intent) = app.handle_key(key) else {
                    continue;
                };
                if intents.send(intent).is_err() || intent == UiIntent::Quit {
                    info!("User quit");
                    return Ok(());
                }
            }
            changed = sessions.changed() => {
                if changed.is_err() {
                    info!("Bridge stopped publishing");
                    return Ok(());
                }
            }
        }
    }
}

/// Reads key presses on a dedicated thread.
///
/// The thread exits once the receiver is dropped.
fn spawn_key_reader() -> mpsc::UnboundedReceiver<KeyCode> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    error!(error = %e, "Failed to poll terminal events");
                    break;
                }
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(key.code).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "Failed to read terminal event");
                    break;
                }
            }
        }
    });

    rx
}
