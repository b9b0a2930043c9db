//! Session state machine.

mod action;
mod reducer;
mod state;

pub use action::{Action, GameSnapshot, MoveUpdate};
pub use reducer::{reduce, replay};
pub use state::{GameId, PlayerId, Session, SessionError, SessionStatus};
