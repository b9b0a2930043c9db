//! Actions the reducer understands.
//!
//! Every inbound frame the bridge accepts becomes exactly one action, and
//! actions are applied in the order their frames arrived.

use super::state::{GameId, PlayerId, SessionError, SessionStatus};
use crate::games::tictactoe::{Board, Mark, Winner};

/// Full snapshot of relay-owned fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Match id.
    pub game_id: Option<GameId>,
    /// Mark assigned to this client.
    pub player_symbol: Option<Mark>,
    /// Authoritative board.
    pub board: Board,
    /// Mark expected to move next.
    pub current_turn: Option<Mark>,
    /// Result, if decided.
    pub winner: Option<Winner>,
    /// Relay-reported error.
    pub error: Option<SessionError>,
}

/// Incremental update after a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveUpdate {
    /// Authoritative board.
    pub board: Board,
    /// Mark expected to move next.
    pub current_turn: Mark,
    /// Relay-reported error.
    pub error: Option<SessionError>,
}

/// Input to the session reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the status.
    SetStatus(SessionStatus),
    /// Record the client identity.
    SetPlayerId(PlayerId),
    /// Apply a full snapshot.
    UpdateGameState(GameSnapshot),
    /// Apply an incremental move update.
    GameMove(MoveUpdate),
    /// Raise an overlay condition without touching game fields.
    SignalError(SessionError),
    /// Return to the initial session.
    Reset,
}

impl From<GameSnapshot> for Action {
    fn from(snapshot: GameSnapshot) -> Self {
        Action::UpdateGameState(snapshot)
    }
}

impl From<MoveUpdate> for Action {
    fn from(update: MoveUpdate) -> Self {
        Action::GameMove(update)
    }
}

impl Action {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetStatus(_) => "SET_STATUS",
            Action::SetPlayerId(_) => "SET_PLAYER_ID",
            Action::UpdateGameState(_) => "UPDATE_GAME_STATE",
            Action::GameMove(_) => "GAME_MOVE",
            Action::SignalError(_) => "SIGNAL_ERROR",
            Action::Reset => "RESET",
        }
    }
}
