//! Headless presentation: follow one game and log each session change.

use crate::bridge::{BridgeError, ProtocolBridge};
use crate::connection::Connector;
use crate::session::Session;
use tracing::{info, instrument, warn};

/// Connects, optionally requests a game, and follows the session.
///
/// Stops when the relay declares a result, the connection drops, or no
/// connection remains. Returns the last session seen.
#[instrument(skip(bridge), fields(url = %bridge.url()))]
pub async fn run_headless<C: Connector>(
    bridge: &mut ProtocolBridge<C>,
    start: bool,
) -> Result<Session, BridgeError> {
    bridge.connect()?;
    if start {
        // Queued until the connection opens.
        bridge.start_game()?;
    }

    let mut last = bridge.session().clone();
    while bridge.pump().await {
        let session = bridge.session();
        if *session != last {
            log_session(session);
            last = session.clone();
        }

        if session.is_over() {
            info!(winner = ?session.winner(), "Game finished");
            break;
        }
        if session.error().as_ref().is_some_and(|e| e.is_connection_lost()) {
            warn!("Connection lost; restart to play again");
            break;
        }
    }

    bridge.close();
    Ok(bridge.session().clone())
}

fn log_session(session: &Session) {
    info!(
        status = %session.status(),
        game_id = ?session.game_id(),
        symbol = ?session.player_symbol(),
        turn = ?session.current_turn(),
        error = ?session.error(),
        "Session changed\n{}",
        session.board().display()
    );
}
