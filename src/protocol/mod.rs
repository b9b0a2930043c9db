//! Relay wire protocol.

mod codec;
mod error;
mod frames;

pub use codec::{GAME_MOVE, GAME_STATE, Inbound, Intent, decode, encode};
pub use error::{DecodeError, EncodeError};
pub use frames::{EmptyPayload, GameMoveFrame, GameStateFrame, MovePayload, OutboundFrame};
