//! Board positions and the cyclic navigation used by the cursor.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A position on the tic-tac-toe board (0-8, row-major).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (position 0)
    #[default]
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in row-major order.
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

    /// Get label for this position (for display).
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

    /// Creates position from a row and column, both 0-2.
    pub fn from_row_column(row: usize, column: usize) -> Option<Self> {
        if row > 2 || column > 2 {
            return None;
        }
        Self::from_index(row * 3 + column)
    }

    /// Row of this position (0 = top).
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column of this position (0 = left).
    pub fn column(self) -> usize {
        self.to_index() % 3
    }

    /// Next column in the same row, wrapping from the right edge back to the left.
    #[instrument(level = "trace")]
    pub fn next_in_row(self) -> Self {
        let index = self.to_index();
        let next = if index % 3 < 2 { index + 1 } else { index - 2 };
        Self::ALL[next]
    }

    /// Next row in the same column, wrapping from the bottom edge back to the top.
    #[instrument(level = "trace")]
    pub fn next_in_column(self) -> Self {
        let index = self.to_index();
        let next = if index < 6 { index + 3 } else { index - 6 };
        Self::ALL[next]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_index_round_trip() {
        for (index, pos) in Position::iter().enumerate() {
            assert_eq!(pos.to_index(), index);
            assert_eq!(Position::from_index(index), Some(pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_row_and_column() {
        assert_eq!(Position::MiddleRight.row(), 1);
        assert_eq!(Position::MiddleRight.column(), 2);
        assert_eq!(Position::from_row_column(2, 1), Some(Position::BottomCenter));
        assert_eq!(Position::from_row_column(3, 0), None);
    }

    #[test]
    fn test_next_in_row_wraps_within_row() {
        assert_eq!(Position::TopLeft.next_in_row(), Position::TopCenter);
        assert_eq!(Position::TopRight.next_in_row(), Position::TopLeft);
        assert_eq!(Position::BottomRight.next_in_row(), Position::BottomLeft);
    }

    #[test]
    fn test_next_in_column_wraps_within_column() {
        assert_eq!(Position::TopCenter.next_in_column(), Position::Center);
        assert_eq!(Position::BottomCenter.next_in_column(), Position::TopCenter);
        assert_eq!(Position::BottomLeft.next_in_column(), Position::TopLeft);
    }
}
