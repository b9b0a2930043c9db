//! Balanced marks invariant: X leads O by zero or one.

use super::monotonic_board::BoardTransition;
use super::Invariant;
use crate::games::tictactoe::{Board, Mark};

/// Invariant: X moves first and players alternate.
///
/// Count of X minus count of O is always 0 or 1.
pub struct BalancedMarksInvariant;

impl Invariant<Board> for BalancedMarksInvariant {
    fn holds(board: &Board) -> bool {
        let x = board.count(Mark::X);
        let o = board.count(Mark::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X count minus O count is 0 or 1"
    }
}

impl Invariant<BoardTransition<'_>> for BalancedMarksInvariant {
    fn holds(transition: &BoardTransition<'_>) -> bool {
        <Self as Invariant<Board>>::holds(transition.after)
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}
