//! Wire shapes of relay frames.
//!
//! Outbound frames carry their data under `payload`; inbound frames carry it
//! next to the `type` tag.

use crate::games::tictactoe::{Board, Mark, Winner};
use crate::session::{GameId, GameSnapshot, MoveUpdate, SessionError, SessionStatus};
use serde::{Deserialize, Serialize};

/// Empty `payload` object of `START_GAME`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyPayload {}

/// `payload` of `MAKE_MOVE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePayload {
    /// Match the move belongs to.
    pub game_id: GameId,
    /// Board index 0-8.
    pub index: u8,
    /// Mark being placed.
    pub symbol: Mark,
}

/// Frame sent to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundFrame {
    /// Ask the relay to seat this client in a game.
    StartGame(EmptyPayload),
    /// Place a mark.
    MakeMove(MovePayload),
}

/// Fields of a `GAME_STATE` frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateFrame {
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Match id.
    #[serde(default)]
    pub game_id: Option<GameId>,
    /// Mark assigned to the receiving client.
    #[serde(default)]
    pub player_symbol: Option<Mark>,
    /// Authoritative board.
    pub board: Board,
    /// Mark expected to move next.
    #[serde(default)]
    pub current_turn: Option<Mark>,
    /// Result, if decided.
    #[serde(default)]
    pub winner: Option<Winner>,
    /// Error text, if any.
    #[serde(default)]
    pub error: Option<String>,
}

impl From<GameStateFrame> for GameSnapshot {
    fn from(frame: GameStateFrame) -> Self {
        GameSnapshot {
            status: frame.status,
            game_id: frame.game_id,
            player_symbol: frame.player_symbol,
            board: frame.board,
            current_turn: frame.current_turn,
            winner: frame.winner,
            error: frame.error.map(SessionError::from_wire),
        }
    }
}

/// Fields of a `GAME_MOVE` frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMoveFrame {
    /// Authoritative board.
    pub board: Board,
    /// Mark expected to move next.
    pub current_turn: Mark,
    /// Error text, if any.
    #[serde(default)]
    pub error: Option<String>,
}

impl From<GameMoveFrame> for MoveUpdate {
    fn from(frame: GameMoveFrame) -> Self {
        MoveUpdate {
            board: frame.board,
            current_turn: frame.current_turn,
            error: frame.error.map(SessionError::from_wire),
        }
    }
}
