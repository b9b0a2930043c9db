//! Named board positions used to address moves.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A position on the tic-tac-toe board (0-8).
///
/// A move can only be addressed through this enum, so the index sent to the
/// relay is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Position {
    /// Index 0, key `1`.
    TopLeft,
    /// Index 1, key `2`.
    TopCenter,
    /// Index 2, key `3`.
    TopRight,
    /// Index 3, key `4`.
    MiddleLeft,
    /// Index 4, key `5`.
    Center,
    /// Index 5, key `6`.
    MiddleRight,
    /// Index 6, key `7`.
    BottomLeft,
    /// Index 7, key `8`.
    BottomCenter,
    /// Index 8, key `9`.
    BottomRight,
}

impl Position {
    /// Human-readable name, used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses a 1-based key ('1'..='9') as pressed on a keypad.
    #[instrument]
    pub fn from_key(key: char) -> Option<Self> {
        let digit = key.to_digit(10)? as usize;
        digit.checked_sub(1).and_then(Self::from_index)
    }

    /// All 9 positions.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
