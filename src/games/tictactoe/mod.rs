//! Tic-tac-toe types as the relay reports them.

mod position;
mod types;

pub mod invariants;

pub use position::Position;
pub use types::{Board, Cell, Mark, Winner};
