//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. The board never stores an outcome;
//! it is always derived from the cells.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, Line, Win, LINES};

use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome derived from the current board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Nobody has won and empty cells remain.
    #[default]
    InProgress,
    /// A player completed a line.
    Win(Win),
    /// The board is full with no complete line.
    Draw,
}

impl Outcome {
    /// Evaluates the board: win check first, draw check only if nobody won.
    #[instrument(level = "trace", skip(board), fields(board = %board))]
    pub fn evaluate(board: &Board) -> Self {
        if let Some(win) = check_winner(board) {
            return Outcome::Win(win);
        }
        if is_full(board) {
            return Outcome::Draw;
        }
        Outcome::InProgress
    }

    /// Returns true while the game can still accept marks.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(win) => Some(win.player),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win(win) => write!(f, "Player {} wins", win.player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
