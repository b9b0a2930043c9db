//! Glue between the connection, the codec and the session reducer.
//!
//! This is the only layer with side effects. Every inbound frame becomes at
//! most one reducer action, applied in arrival order; every intent becomes
//! at most one outbound frame.

use crate::connection::{
    AlreadyConnectedError, ConnectionEvent, ConnectionManager, ConnectionState, Connector,
};
use crate::games::tictactoe::Position;
use crate::games::tictactoe::invariants::{BoardTransition, InvariantSet, RelayBoardInvariants};
use crate::protocol::{EncodeError, Intent, decode, encode};
use crate::session::{Action, Session, SessionError, SessionStatus, reduce};
use derive_more::{Display, Error};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Commands presentation can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiIntent {
    /// Ask the relay for a game.
    StartGame,
    /// Place this client's mark.
    MakeMove(Position),
    /// Drop the connection and session and start over.
    Reset,
    /// Stop the event loop.
    Quit,
}

/// Errors surfaced to the caller of a bridge operation.
#[derive(Debug, Display, Error)]
pub enum BridgeError {
    /// A connection is already owned.
    #[display("{}", _0)]
    AlreadyConnected(AlreadyConnectedError),
    /// A move needs a game id and an assigned mark.
    #[display("No active game to move in")]
    NoActiveGame,
    /// Intent could not be serialized.
    #[display("{}", _0)]
    Encode(EncodeError),
}

impl From<AlreadyConnectedError> for BridgeError {
    fn from(err: AlreadyConnectedError) -> Self {
        BridgeError::AlreadyConnected(err)
    }
}

impl From<EncodeError> for BridgeError {
    fn from(err: EncodeError) -> Self {
        BridgeError::Encode(err)
    }
}

/// Maps one connection event to the reducer action it drives.
///
/// Unknown frame types map to `None`. Undecodable frames raise a decode
/// error on the session instead of changing game state.
pub fn action_for(event: ConnectionEvent) -> Option<Action> {
    match event {
        ConnectionEvent::Open => Some(Action::SetStatus(SessionStatus::Connected)),
        ConnectionEvent::Message(text) => match decode(&text) {
            Ok(Some(inbound)) => Some(inbound.into_action()),
            Ok(None) => None,
            Err(e) => {
                warn!(
                    error = %e,
                    frame_len = text.len(),
                    frame = frame_preview(&text),
                    "Dropping undecodable frame"
                );
                Some(Action::SignalError(SessionError::DecodeFailed(e.message)))
            }
        },
        ConnectionEvent::Closed { reason } => {
            info!(?reason, "Relay connection lost");
            Some(Action::SignalError(SessionError::ConnectionLost))
        }
    }
}

/// Longest frame prefix written to the log.
const FRAME_PREVIEW_BYTES: usize = 64;

/// Leading slice of `text`, cut on a char boundary at most
/// `FRAME_PREVIEW_BYTES` long.
fn frame_preview(text: &str) -> &str {
    if text.len() <= FRAME_PREVIEW_BYTES {
        return text;
    }
    let mut end = FRAME_PREVIEW_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Drives one client: owns the connection, the session and its publisher.
pub struct ProtocolBridge<C> {
    manager: ConnectionManager<C>,
    url: String,
    session: Session,
    session_tx: watch::Sender<Session>,
}

impl<C: Connector> ProtocolBridge<C> {
    /// Creates a bridge for the relay at `url`. Does not connect yet.
    #[instrument(skip(connector, url), fields(url = %url.as_ref()))]
    pub fn new(connector: C, url: impl AsRef<str>) -> Self {
        let (session_tx, _) = watch::channel(Session::new());
        Self {
            manager: ConnectionManager::new(connector),
            url: url.as_ref().to_string(),
            session: Session::new(),
            session_tx,
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Endpoint this bridge connects to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Phase of the underlying connection.
    pub fn connection_state(&self) -> ConnectionState {
        self.manager.state()
    }

    /// Read-only feed of every new session value.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session_tx.subscribe()
    }

    /// Opens the relay connection.
    #[instrument(skip(self), fields(url = %self.url))]
    pub fn connect(&mut self) -> Result<(), BridgeError> {
        self.manager.connect(&self.url)?;
        Ok(())
    }

    /// Applies an action and publishes the resulting session.
    #[instrument(skip(self, action), fields(action = action.kind()))]
    pub fn dispatch(&mut self, action: Action) -> &Session {
        let next = reduce(&self.session, &action);

        if action != Action::Reset {
            let transition = BoardTransition::new(self.session.board(), next.board());
            if let Err(violations) = RelayBoardInvariants::check_all(&transition) {
                for violation in violations {
                    warn!(invariant = %violation.description, "Relay board breaks invariant");
                }
            }
        }

        if next.status() != self.session.status() {
            info!(from = %self.session.status(), to = %next.status(), "Session status changed");
        }
        debug!(session = ?next, "Session updated");

        self.session = next;
        self.session_tx.send_replace(self.session.clone());
        &self.session
    }

    /// Feeds one connection event through the codec and reducer.
    pub fn handle_event(&mut self, event: ConnectionEvent) {
        if let Some(action) = action_for(event) {
            self.dispatch(action);
        }
    }

    /// Waits for one connection event and applies it.
    ///
    /// Returns `false` when no connection is owned.
    pub async fn pump(&mut self) -> bool {
        match self.manager.next_event().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Asks the relay for a game.
    #[instrument(skip(self))]
    pub fn start_game(&mut self) -> Result<(), BridgeError> {
        info!("Requesting game");
        self.send_intent(&Intent::StartGame)
    }

    /// Forwards a move to the relay without judging it.
    #[instrument(skip(self))]
    pub fn make_move(&mut self, position: Position) -> Result<(), BridgeError> {
        let (Some(game_id), Some(symbol)) =
            (self.session.game_id().clone(), *self.session.player_symbol())
        else {
            warn!("Move requested before a game was assigned");
            return Err(BridgeError::NoActiveGame);
        };

        info!(game_id = %game_id, %position, %symbol, "Submitting move");
        self.send_intent(&Intent::MakeMove {
            game_id,
            position,
            symbol,
        })
    }

    /// Closes the connection, discards the session and connects again.
    #[instrument(skip(self), fields(url = %self.url))]
    pub fn reset(&mut self) -> Result<(), BridgeError> {
        info!("Resetting session");
        self.manager.close();
        self.dispatch(Action::Reset);
        self.connect()
    }

    /// Closes the connection without touching the session.
    pub fn close(&mut self) {
        self.manager.close();
    }

    /// Handles one presentation command. Returns `false` on quit.
    pub fn handle_intent(&mut self, intent: UiIntent) -> Result<bool, BridgeError> {
        match intent {
            UiIntent::StartGame => self.start_game()?,
            UiIntent::MakeMove(position) => self.make_move(position)?,
            UiIntent::Reset => self.reset()?,
            UiIntent::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Runs the event loop until quit or the intent channel closes.
    ///
    /// Connection events and intents are handled one at a time, each to
    /// completion, in the order they are observed.
    #[instrument(skip_all, fields(url = %self.url))]
    pub async fn run(&mut self, mut intents: mpsc::UnboundedReceiver<UiIntent>) {
        info!("Bridge event loop started");

        loop {
            tokio::select! {
                event = self.manager.next_event(), if self.manager.is_active() => {
                    if let Some(event) = event {
                        self.handle_event(event);
                    }
                }
                intent = intents.recv() => {
                    let Some(intent) = intent else {
                        debug!("Intent channel closed");
                        break;
                    };
                    match self.handle_intent(intent) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(e) => warn!(error = %e, ?intent, "Intent not sent"),
                    }
                }
            }
        }

        self.manager.close();
        info!("Bridge event loop stopped");
    }

    fn send_intent(&mut self, intent: &Intent) -> Result<(), BridgeError> {
        let frame = encode(intent)?;
        self.manager.send(frame);
        Ok(())
    }
}
