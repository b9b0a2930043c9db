//! Translation between relay text frames and typed messages.

use super::error::{DecodeError, EncodeError};
use super::frames::{EmptyPayload, GameMoveFrame, GameStateFrame, MovePayload, OutboundFrame};
use crate::games::tictactoe::{Mark, Position};
use crate::session::{Action, GameId};
use serde_json::Value;
use tracing::{debug, instrument};

/// Tag of a full-snapshot frame.
pub const GAME_STATE: &str = "GAME_STATE";

/// Tag of an incremental move frame.
pub const GAME_MOVE: &str = "GAME_MOVE";

/// Something the client asks the relay to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Request a game.
    StartGame,
    /// Place `symbol` at `position` in `game_id`.
    MakeMove {
        /// Match id.
        game_id: GameId,
        /// Target cell.
        position: Position,
        /// Mark being placed.
        symbol: Mark,
    },
}

impl From<&Intent> for OutboundFrame {
    fn from(intent: &Intent) -> Self {
        match intent {
            Intent::StartGame => OutboundFrame::StartGame(EmptyPayload {}),
            Intent::MakeMove {
                game_id,
                position,
                symbol,
            } => OutboundFrame::MakeMove(MovePayload {
                game_id: game_id.clone(),
                index: position.to_index() as u8,
                symbol: *symbol,
            }),
        }
    }
}

/// A recognized inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Full snapshot.
    GameState(GameStateFrame),
    /// Incremental move update.
    GameMove(GameMoveFrame),
}

impl Inbound {
    /// The reducer action this frame drives.
    pub fn into_action(self) -> Action {
        match self {
            Inbound::GameState(frame) => Action::UpdateGameState(frame.into()),
            Inbound::GameMove(frame) => Action::GameMove(frame.into()),
        }
    }
}

/// Encodes an intent as a `{type, payload}` text frame.
#[instrument]
pub fn encode(intent: &Intent) -> Result<String, EncodeError> {
    let text = serde_json::to_string(&OutboundFrame::from(intent))?;
    debug!(frame = %text, "Encoded outbound frame");
    Ok(text)
}

/// Decodes an inbound text frame.
///
/// Returns `Ok(None)` for objects whose `type` this client does not know,
/// including a non-string tag. Text that is not a JSON object carrying a
/// `type` key is an error.
#[instrument(skip(text), fields(len = text.len()))]
pub fn decode(text: &str) -> Result<Option<Inbound>, DecodeError> {
    let value: Value = serde_json::from_str(text)?;

    let kind = match value.as_object().and_then(|frame| frame.get("type")) {
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => {
            debug!(tag = %other, "Ignoring frame with non-string type");
            return Ok(None);
        }
        None => return Err(DecodeError::new("Frame is not an object with a `type` tag")),
    };

    let inbound = match kind.as_str() {
        GAME_STATE => Inbound::GameState(serde_json::from_value(value)?),
        GAME_MOVE => Inbound::GameMove(serde_json::from_value(value)?),
        other => {
            debug!(kind = other, "Ignoring unrecognized frame type");
            return Ok(None);
        }
    };

    debug!(kind = %kind, "Decoded inbound frame");
    Ok(Some(inbound))
}
