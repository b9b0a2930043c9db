//! Core domain types for tic-tac-toe as seen by a relay client.

use serde::{Deserialize, Serialize};

/// Player mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

/// A cell on the board.
///
/// On the wire an empty cell is `null` and a marked cell is `"X"` or `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Mark>", into = "Option<Mark>")]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a mark.
    Marked(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Option<Mark>> for Cell {
    fn from(value: Option<Mark>) -> Self {
        value.map_or(Cell::Empty, Cell::Marked)
    }
}

impl From<Cell> for Option<Mark> {
    fn from(cell: Cell) -> Self {
        cell.mark()
    }
}

/// Wire forms a board may arrive in.
///
/// Current relays send a flat row-major array; older ones sent three rows.
#[derive(Deserialize)]
#[serde(untagged)]
enum BoardRepr {
    Flat([Cell; 9]),
    Rows([[Cell; 3]; 3]),
}

impl From<BoardRepr> for Board {
    fn from(repr: BoardRepr) -> Self {
        match repr {
            BoardRepr::Flat(cells) => Board { cells },
            BoardRepr::Rows(rows) => {
                let mut cells = [Cell::Empty; 9];
                for (row, line) in rows.iter().enumerate() {
                    for (col, cell) in line.iter().enumerate() {
                        cells[row * 3 + col] = *cell;
                    }
                }
                Board { cells }
            }
        }
    }
}

impl From<Board> for [Cell; 9] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

/// 3x3 board as reported by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BoardRepr", into = "[Cell; 9]")]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Creates a board from nine row-major cells.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    ///
    /// Out-of-range indices leave the board unchanged.
    pub fn with(mut self, index: usize, mark: Mark) -> Self {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Cell::Marked(mark);
        }
        self
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Counts the cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.mark() == Some(mark))
            .count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based key so a player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Marked(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Final result of a game, as decided by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
    /// X completed a line.
    X,
    /// O completed a line.
    O,
    /// Board filled with no line.
    #[display("Draw")]
    Draw,
}

impl From<Mark> for Winner {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Winner::X,
            Mark::O => Winner::O,
        }
    }
}
