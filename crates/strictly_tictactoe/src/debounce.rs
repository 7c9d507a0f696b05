//! Edge-detecting button debouncer.
//!
//! A press is reported only when the line changes from released to pressed.
//! There is no stable-duration window; holding a button produces exactly one
//! event until it is released and pressed again.

use crate::io::{Button, ButtonEvents, Level};
use tracing::trace;

/// Debouncer for one active-low button line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    pressed: bool,
}

impl Debouncer {
    /// Creates a debouncer that starts in the released state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw reading; returns true on a released-to-pressed edge.
    pub fn sample(&mut self, raw: Level) -> bool {
        let pressed = raw.is_pressed();
        let edge = pressed && !self.pressed;
        self.pressed = pressed;
        edge
    }
}

/// One debouncer per button, with no state shared between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonBank {
    horizontal: Debouncer,
    vertical: Debouncer,
    place: Debouncer,
}

impl ButtonBank {
    /// Creates a bank with every button released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples all three lines through `read` and returns this tick's edges.
    pub fn sample(&mut self, mut read: impl FnMut(Button) -> Level) -> ButtonEvents {
        let events = ButtonEvents {
            horizontal: self.horizontal.sample(read(Button::Horizontal)),
            vertical: self.vertical.sample(read(Button::Vertical)),
            place: self.place.sample(read(Button::Place)),
        };
        if events.any() {
            trace!(?events, "Button edges");
        }
        events
    }
}
