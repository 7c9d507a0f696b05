//! Tic-tac-toe core for a three-button handheld.
//!
//! Pure game logic with no I/O of its own:
//!
//! - **Board** and **rules**: cells, placement, win and draw detection
//! - **Cursor**: cyclic row/column navigation
//! - **Debouncer**: edge detection on active-low button lines
//! - **GameState**: the per-tick state machine with the timed auto-reset
//! - **Handheld**: wires the above to [`ButtonLines`], [`MonotonicClock`]
//!   and [`RenderSink`] implementations supplied by the device

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cursor;
mod debounce;
mod handheld;
mod invariants;
mod io;
mod machine;
mod position;
mod rules;
mod types;

pub use cursor::Cursor;
pub use debounce::{ButtonBank, Debouncer};
pub use handheld::Handheld;
pub use invariants::{
    GameInvariants, Invariant, InvariantSet, InvariantViolation, MarkBalanceInvariant,
    ResetTimerInvariant,
};
pub use io::{Button, ButtonEvents, ButtonLines, Level, ManualClock, MonotonicClock, RenderSink};
pub use machine::{Frame, GameState, Phase, RESET_DELAY_MS};
pub use position::Position;
pub use rules::{Line, LINES, Outcome, Win, check_winner, is_draw, is_full};
pub use types::{Board, BoardParseError, Cell, Placement, Player};
