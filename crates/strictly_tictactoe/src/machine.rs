//! The per-tick game state machine.
//!
//! [`GameState`] is the single owned aggregate for board, cursor, turn and
//! the post-game reset timer. Each call to [`GameState::tick`] runs one pass
//! of the fixed update order and returns the frame to draw.

use crate::cursor::Cursor;
use crate::invariants::{GameInvariants, InvariantSet};
use crate::io::ButtonEvents;
use crate::position::Position;
use crate::rules::Outcome;
use crate::types::{Board, Placement, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// How long a finished game stays on screen before the board resets.
pub const RESET_DELAY_MS: u64 = 3000;

/// Coarse phase of the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Marks can be placed.
    #[default]
    Playing,
    /// A win or draw is on screen, waiting for the reset timer.
    Ended,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Frame<'a> {
    /// Board contents.
    pub board: &'a Board,
    /// Highlighted cell.
    pub cursor: Position,
    /// Player whose mark the next placement uses.
    pub to_move: Player,
    /// Outcome derived from `board`.
    pub outcome: Outcome,
    /// Phase after this tick's update.
    pub phase: Phase,
}

/// Board, cursor, turn and reset timer for one handheld.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    cursor: Cursor,
    to_move: Player,
    phase: Phase,
    ended_at: Option<u64>,
    reset_delay_ms: u64,
}

impl GameState {
    /// Creates a fresh game with the standard reset delay.
    #[instrument]
    pub fn new() -> Self {
        Self::with_reset_delay(RESET_DELAY_MS)
    }

    /// Creates a fresh game that resets `reset_delay_ms` after it ends.
    #[instrument]
    pub fn with_reset_delay(reset_delay_ms: u64) -> Self {
        Self {
            board: Board::new(),
            cursor: Cursor::new(),
            to_move: Player::X,
            phase: Phase::Playing,
            ended_at: None,
            reset_delay_ms,
        }
    }

    /// Runs one update pass.
    ///
    /// Order: evaluate the outcome, apply horizontal then vertical
    /// navigation, attempt a placement, latch game end, fire the reset timer.
    /// The outcome used for gating placement and game end is the one
    /// evaluated before this tick's placement.
    #[instrument(level = "trace", skip(self), fields(phase = ?self.phase))]
    pub fn tick(&mut self, events: ButtonEvents, now_ms: u64) -> Frame<'_> {
        let outcome = Outcome::evaluate(&self.board);

        if events.horizontal {
            self.cursor.move_horizontal();
        }
        if events.vertical {
            self.cursor.move_vertical();
        }

        if events.place {
            if self.phase == Phase::Playing && outcome.is_in_progress() {
                self.place_at_cursor();
            } else {
                debug!(%outcome, "Placement ignored, game is over");
            }
        }

        if !outcome.is_in_progress() && self.phase == Phase::Playing {
            info!(%outcome, now_ms, "Game ended");
            self.phase = Phase::Ended;
            self.ended_at = Some(now_ms);
        }

        if let Some(ended_at) = self.ended_at {
            if now_ms.saturating_sub(ended_at) >= self.reset_delay_ms {
                info!(elapsed_ms = now_ms.saturating_sub(ended_at), "Reset delay elapsed");
                self.reset();
            }
        }

        debug_assert!(
            GameInvariants::check_all(self).is_ok(),
            "game invariants violated: {:?}",
            GameInvariants::check_all(self)
        );

        self.frame()
    }

    fn place_at_cursor(&mut self) {
        let position = self.cursor.position();
        match self.board.place(position, self.to_move) {
            Placement::Placed => {
                info!(player = %self.to_move, %position, "Mark placed");
                self.to_move = self.to_move.opponent();
            }
            Placement::Rejected => {
                debug!(%position, "Placement absorbed, cell occupied");
            }
        }
    }

    /// Restores the initial state in place.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        self.cursor.reset();
        self.to_move = Player::X;
        self.phase = Phase::Playing;
        self.ended_at = None;
        info!("Game reset");
    }

    /// Current frame without advancing the state.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            board: &self.board,
            cursor: self.cursor.position(),
            to_move: self.to_move,
            outcome: Outcome::evaluate(&self.board),
            phase: self.phase,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// When the current game ended, if it has.
    pub fn ended_at(&self) -> Option<u64> {
        self.ended_at
    }

    /// Configured reset delay.
    pub fn reset_delay_ms(&self) -> u64 {
        self.reset_delay_ms
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Button;
    use crate::types::Cell;

    fn press(game: &mut GameState, button: Button, now_ms: u64) {
        game.tick(ButtonEvents::press(button), now_ms);
    }

    fn idle(game: &mut GameState, now_ms: u64) {
        game.tick(ButtonEvents::default(), now_ms);
    }

    /// X takes the top row while O plays the middle row.
    fn play_top_row_win(game: &mut GameState) {
        // X@0, O@3, X@1, O@4, X@2
        let script = [
            Button::Place,
            Button::Vertical,
            Button::Place,
            Button::Vertical,
            Button::Vertical,
            Button::Horizontal,
            Button::Place,
            Button::Vertical,
            Button::Place,
            Button::Vertical,
            Button::Vertical,
            Button::Horizontal,
            Button::Place,
        ];
        for button in script {
            press(game, button, 0);
        }
    }

    #[test]
    fn test_initial_state() {
        let game = GameState::new();
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.cursor().position(), Position::TopLeft);
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.ended_at(), None);
    }

    #[test]
    fn test_place_flips_turn() {
        let mut game = GameState::new();
        press(&mut game, Button::Place, 0);
        assert_eq!(game.board().get(Position::TopLeft), Cell::Occupied(Player::X));
        assert_eq!(game.to_move(), Player::O);
    }

    #[test]
    fn test_place_on_occupied_cell_is_absorbed() {
        let mut game = GameState::new();
        press(&mut game, Button::Place, 0);
        let board = game.board().clone();

        press(&mut game, Button::Place, 1);
        assert_eq!(game.board(), &board);
        assert_eq!(game.to_move(), Player::O);
    }

    #[test]
    fn test_top_row_win_ends_on_following_tick() {
        let mut game = GameState::new();
        play_top_row_win(&mut game);
        assert_eq!(game.board().to_string(), "XXX/OO./...");
        // The winning tick evaluated the board before the mark went down.
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.frame().outcome.winner(), Some(Player::X));

        idle(&mut game, 100);
        assert_eq!(game.phase(), Phase::Ended);
        assert_eq!(game.ended_at(), Some(100));
    }

    #[test]
    fn test_board_frozen_until_reset_delay() {
        let mut game = GameState::new();
        play_top_row_win(&mut game);
        idle(&mut game, 1_000);
        let board = game.board().clone();

        // Cursor still moves, placements are ignored.
        press(&mut game, Button::Vertical, 2_000);
        press(&mut game, Button::Place, 2_500);
        assert_eq!(game.board(), &board);
        assert_eq!(game.cursor().position(), Position::MiddleRight);
        assert_eq!(game.to_move(), Player::O);

        idle(&mut game, 3_999);
        assert_eq!(game.phase(), Phase::Ended);

        idle(&mut game, 4_000);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.cursor().position(), Position::TopLeft);
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.ended_at(), None);
        assert_eq!(game.frame().outcome, Outcome::InProgress);
    }

    #[test]
    fn test_draw_ends_game() {
        let mut game = GameState::with_reset_delay(10);
        // Cursor walk producing XOX/OXX/OXO:
        // X0 O1 X2 O3 X4 O6 X5 O8 X7
        let placements = [0, 1, 2, 3, 4, 6, 5, 8, 7];
        for target in placements {
            while game.cursor().position().to_index() != target {
                if game.cursor().position().row() != target / 3 {
                    press(&mut game, Button::Vertical, 0);
                } else {
                    press(&mut game, Button::Horizontal, 0);
                }
            }
            press(&mut game, Button::Place, 0);
        }
        assert_eq!(game.board().to_string(), "XOX/OXX/OXO");

        idle(&mut game, 5);
        assert_eq!(game.phase(), Phase::Ended);
        assert_eq!(game.frame().outcome, Outcome::Draw);

        idle(&mut game, 15);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn test_cursor_scenario() {
        let mut game = GameState::new();
        press(&mut game, Button::Place, 0);
        press(&mut game, Button::Horizontal, 0);
        assert_eq!(game.cursor().position(), Position::TopCenter);
        press(&mut game, Button::Place, 0);
        press(&mut game, Button::Horizontal, 0);
        press(&mut game, Button::Place, 0);

        assert_eq!(game.board().to_string(), "XOX/.../...");
        assert_eq!(game.frame().outcome, Outcome::InProgress);
        assert_eq!(game.to_move(), Player::O);
    }

    #[test]
    fn test_navigation_applies_before_placement() {
        let mut game = GameState::new();
        game.tick(
            ButtonEvents {
                horizontal: true,
                vertical: true,
                place: true,
            },
            0,
        );
        assert_eq!(game.board().get(Position::Center), Cell::Occupied(Player::X));
    }
}
