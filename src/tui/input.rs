//! Keyboard mapping for the board cursor.

use crate::games::tictactoe::Position;
use crossterm::event::KeyCode;

/// Moves cursor based on arrow keys.
///
/// The cursor stops at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };

    Position::from_index(row * 3 + col).unwrap_or(cursor)
}
