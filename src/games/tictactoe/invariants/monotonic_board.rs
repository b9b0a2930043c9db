//! Monotonic board invariant: a marked cell is never cleared or changed.

use super::Invariant;
use crate::games::tictactoe::Board;

/// A board before and after one applied update.
#[derive(Debug, Clone, Copy)]
pub struct BoardTransition<'a> {
    /// Board prior to the update.
    pub before: &'a Board,
    /// Board after the update.
    pub after: &'a Board,
}

impl<'a> BoardTransition<'a> {
    /// Pairs two boards as a transition.
    pub fn new(before: &'a Board, after: &'a Board) -> Self {
        Self { before, after }
    }
}

/// Invariant: Board is monotonic.
///
/// Once a cell holds a mark it keeps that mark until the session resets.
pub struct MonotonicBoardInvariant;

impl Invariant<BoardTransition<'_>> for MonotonicBoardInvariant {
    fn holds(transition: &BoardTransition<'_>) -> bool {
        transition
            .before
            .cells()
            .iter()
            .zip(transition.after.cells().iter())
            .all(|(before, after)| before.is_empty() || before == after)
    }

    fn description() -> &'static str {
        "Marked cells never revert or change owner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;

    #[test]
    fn test_filling_a_cell_holds() {
        let before = Board::new();
        let after = Board::new().with(4, Mark::X);
        assert!(MonotonicBoardInvariant::holds(&BoardTransition::new(&before, &after)));
    }

    #[test]
    fn test_clearing_a_cell_violates() {
        let before = Board::new().with(4, Mark::X);
        let after = Board::new();
        assert!(!MonotonicBoardInvariant::holds(&BoardTransition::new(&before, &after)));
    }

    #[test]
    fn test_overwriting_a_cell_violates() {
        let before = Board::new().with(4, Mark::X);
        let after = Board::new().with(4, Mark::O);
        assert!(!MonotonicBoardInvariant::holds(&BoardTransition::new(&before, &after)));
    }
}
