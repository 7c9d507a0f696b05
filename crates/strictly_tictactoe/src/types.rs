//! Core domain types for tic-tac-toe.

use crate::position::Position;
use crate::rules;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The mark symbol this player places.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Cell {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    fn symbol(self) -> char {
        self.player().map_or('.', Player::symbol)
    }
}

/// Result of asking the board to take a mark.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The cell was empty and now holds the mark.
    Placed,
    /// The cell was already occupied; the board is unchanged.
    Rejected,
}

impl Placement {
    /// Returns true if the mark was placed.
    pub fn is_placed(self) -> bool {
        matches!(self, Placement::Placed)
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
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

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Places a mark if the cell is empty.
    ///
    /// Turn order and game-over are the caller's concern.
    #[instrument(skip_all, fields(position = %pos, player = %player))]
    pub fn place(&mut self, pos: Position, player: Player) -> Placement {
        if !self.is_empty(pos) {
            debug!("Cell already occupied");
            return Placement::Rejected;
        }
        self.cells[pos.to_index()] = Cell::Occupied(player);
        Placement::Placed
    }

    /// Resets every cell to empty.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Checks for a winner on the board.
    pub fn winner(&self) -> Option<rules::Win> {
        rules::check_winner(self)
    }

    /// Number of cells holding the given player's mark.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Occupied(player))
            .count()
    }
}

/// Rows separated by `/`, with `X`, `O` and `.` for empty.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            for cell in chunk {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Error parsing a board from its `XXX/OO./...` notation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board notation {:?}: {}", input, reason)]
pub struct BoardParseError {
    /// The rejected input.
    pub input: String,
    /// Why it was rejected.
    pub reason: &'static str,
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| BoardParseError {
            input: s.to_string(),
            reason,
        };

        let rows: Vec<&str> = s.trim().split('/').collect();
        if rows.len() != 3 {
            return Err(fail("expected three rows separated by '/'"));
        }

        let mut board = Board::new();
        for (row, text) in rows.iter().enumerate() {
            let symbols: Vec<char> = text.chars().collect();
            if symbols.len() != 3 {
                return Err(fail("each row must have three cells"));
            }
            for (column, symbol) in symbols.into_iter().enumerate() {
                board.cells[row * 3 + column] = match symbol {
                    'X' | 'x' => Cell::Occupied(Player::X),
                    'O' | 'o' => Cell::Occupied(Player::O),
                    '.' | ' ' | '-' => Cell::Empty,
                    _ => return Err(fail("cells must be X, O or '.'")),
                };
            }
        }
        Ok(board)
    }
}
