//! Selection cursor driven by the two navigation buttons.

use crate::position::Position;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The highlighted cell.
///
/// Navigation only ever cycles within the current row or column, so every
/// position is reachable and no move can leave the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    position: Position,
}

impl Cursor {
    /// Creates a cursor on the top-left cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cursor on the given cell.
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Currently highlighted cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Advances one column to the right, wrapping within the row.
    pub fn move_horizontal(&mut self) {
        self.position = self.position.next_in_row();
        trace!(position = %self.position, "Cursor moved horizontally");
    }

    /// Advances one row down, wrapping within the column.
    pub fn move_vertical(&mut self) {
        self.position = self.position.next_in_column();
        trace!(position = %self.position, "Cursor moved vertically");
    }

    /// Returns to the top-left cell.
    pub fn reset(&mut self) {
        self.position = Position::TopLeft;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_cycle_length_is_three() {
        for start in Position::ALL {
            let mut cursor = Cursor::at(start);
            cursor.move_horizontal();
            assert_ne!(cursor.position(), start);
            assert_eq!(cursor.position().row(), start.row());
            cursor.move_horizontal();
            cursor.move_horizontal();
            assert_eq!(cursor.position(), start);
        }
    }

    #[test]
    fn test_vertical_cycle_length_is_three() {
        for start in Position::ALL {
            let mut cursor = Cursor::at(start);
            cursor.move_vertical();
            assert_ne!(cursor.position(), start);
            assert_eq!(cursor.position().column(), start.column());
            cursor.move_vertical();
            cursor.move_vertical();
            assert_eq!(cursor.position(), start);
        }
    }

    #[test]
    fn test_eight_horizontal_moves_land_two_columns_over() {
        let mut cursor = Cursor::at(Position::MiddleLeft);
        for _ in 0..8 {
            cursor.move_horizontal();
        }
        // 8 = 2 full cycles + 2 steps
        assert_eq!(cursor.position(), Position::MiddleRight);
    }

    #[test]
    fn test_reset_returns_to_top_left() {
        let mut cursor = Cursor::at(Position::BottomRight);
        cursor.reset();
        assert_eq!(cursor.position(), Position::TopLeft);
    }
}
