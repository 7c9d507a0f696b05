//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the eight winning triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    cells: [Position; 3],
}

impl Line {
    const fn new(a: Position, b: Position, c: Position) -> Self {
        Self { cells: [a, b, c] }
    }

    /// The three positions of the line, in scan order.
    pub fn cells(&self) -> [Position; 3] {
        self.cells
    }

    /// First endpoint (where a strike-through starts).
    pub fn start(&self) -> Position {
        self.cells[0]
    }

    /// Last endpoint (where a strike-through ends).
    pub fn end(&self) -> Position {
        self.cells[2]
    }
}

/// Winning lines in scan order: rows top to bottom, columns left to right,
/// main diagonal, anti diagonal. When several lines are complete the first
/// one in this table is reported.
pub const LINES: [Line; 8] = [
    // Rows
    Line::new(Position::TopLeft, Position::TopCenter, Position::TopRight),
    Line::new(Position::MiddleLeft, Position::Center, Position::MiddleRight),
    Line::new(Position::BottomLeft, Position::BottomCenter, Position::BottomRight),
    // Columns
    Line::new(Position::TopLeft, Position::MiddleLeft, Position::BottomLeft),
    Line::new(Position::TopCenter, Position::Center, Position::BottomCenter),
    Line::new(Position::TopRight, Position::MiddleRight, Position::BottomRight),
    // Diagonals
    Line::new(Position::TopLeft, Position::Center, Position::BottomRight),
    Line::new(Position::TopRight, Position::Center, Position::BottomLeft),
];

/// A completed line and who completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Win {
    /// The player holding all three cells.
    pub player: Player,
    /// The completed line.
    pub line: Line,
}

/// Checks if there is a winner on the board.
///
/// Returns the first complete line in [`LINES`] order, `None` otherwise.
#[instrument(level = "trace", skip(board))]
pub fn check_winner(board: &Board) -> Option<Win> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.cells;
        let player = board.get(a).player()?;
        (board.get(b) == board.get(a) && board.get(c) == board.get(a)).then_some(Win {
            player,
            line: *line,
        })
    })
}
