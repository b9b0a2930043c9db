//! Client-side view of one relayed game.

use crate::games::tictactoe::{Board, Mark, Winner};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Opaque identifier the relay assigns to a formed match.
pub type GameId = String;

/// Client identity used for bookkeeping.
pub type PlayerId = String;

/// Where the session is in its lifecycle.
///
/// Variants are declared in lifecycle order; the derived `Ord` is the
/// forward direction of the status graph.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// No connection yet.
    #[default]
    #[display("Not connected")]
    NotConnected,
    /// Connection open, no game requested.
    #[display("Connected")]
    Connected,
    /// Game requested, relay is looking for an opponent.
    #[display("Waiting for opponent")]
    WaitingForOpponent,
    /// Both players seated.
    #[display("In progress")]
    InProgress,
    /// Relay declared a result.
    #[display("Completed")]
    Completed,
}

/// Side-channel condition rendered as an overlay.
///
/// Independent of [`SessionStatus`]; the board stays visible underneath.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SessionError {
    /// The connection to the relay dropped, or the relay says the opponent's did.
    #[display("Connection lost")]
    ConnectionLost,
    /// An inbound frame could not be decoded.
    #[display("Could not read message from server: {}", _0)]
    DecodeFailed(String),
    /// Error text reported by the relay, verbatim.
    #[display("{}", _0)]
    Peer(String),
}

impl SessionError {
    /// Wire token the relay uses for a lost connection.
    pub const CONNECTION_LOST: &'static str = "CONNECTION_LOST";

    /// Maps a relay `error` string to a session error.
    pub fn from_wire(message: String) -> Self {
        if message == Self::CONNECTION_LOST {
            SessionError::ConnectionLost
        } else {
            SessionError::Peer(message)
        }
    }

    /// Checks if this is a lost-connection signal.
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, SessionError::ConnectionLost)
    }
}

/// Aggregate client-side state of one game.
///
/// Only [`reduce`](crate::reduce) produces new values; everything else
/// reads through the getters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct Session {
    /// Lifecycle status.
    status: SessionStatus,
    /// Relay-assigned match id, absent before a match forms.
    game_id: Option<GameId>,
    /// Mark the relay assigned to this client.
    player_symbol: Option<Mark>,
    /// Client identity bookkeeping.
    player_id: Option<PlayerId>,
    /// Board as last reported by the relay.
    board: Board,
    /// Mark expected to move next.
    current_turn: Option<Mark>,
    /// Result, only present once completed.
    winner: Option<Winner>,
    /// Overlay condition, if any.
    error: Option<SessionError>,
}

impl Session {
    /// Creates the initial session: not connected, empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the relay expects a move from this client.
    pub fn is_my_turn(&self) -> bool {
        self.status == SessionStatus::InProgress
            && self.player_symbol.is_some()
            && self.current_turn == self.player_symbol
    }

    /// Checks if the relay has declared a result.
    pub fn is_over(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    pub(super) fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
    }

    pub(super) fn set_game_id(&mut self, game_id: Option<GameId>) {
        self.game_id = game_id;
    }

    pub(super) fn set_player_symbol(&mut self, symbol: Option<Mark>) {
        self.player_symbol = symbol;
    }

    pub(super) fn set_player_id(&mut self, player_id: PlayerId) {
        self.player_id = Some(player_id);
    }

    pub(super) fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub(super) fn set_current_turn(&mut self, turn: Option<Mark>) {
        self.current_turn = turn;
    }

    pub(super) fn set_winner(&mut self, winner: Option<Winner>) {
        self.winner = winner;
    }

    pub(super) fn set_error(&mut self, error: Option<SessionError>) {
        self.error = error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_order_follows_lifecycle() {
        assert!(SessionStatus::NotConnected < SessionStatus::Connected);
        assert!(SessionStatus::Connected < SessionStatus::WaitingForOpponent);
        assert!(SessionStatus::WaitingForOpponent < SessionStatus::InProgress);
        assert!(SessionStatus::InProgress < SessionStatus::Completed);
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&SessionStatus::WaitingForOpponent).unwrap();
        assert_eq!(json, "\"WAITING_FOR_OPPONENT\"");
    }

    #[test]
    fn test_connection_lost_token_maps_to_variant() {
        assert_eq!(
            SessionError::from_wire("CONNECTION_LOST".to_string()),
            SessionError::ConnectionLost
        );
        assert_eq!(
            SessionError::from_wire("Square taken".to_string()),
            SessionError::Peer("Square taken".to_string())
        );
    }

    #[test]
    fn test_initial_session_is_not_my_turn() {
        let session = Session::new();
        assert_eq!(*session.status(), SessionStatus::NotConnected);
        assert!(!session.is_my_turn());
        assert!(!session.is_over());
    }
}
