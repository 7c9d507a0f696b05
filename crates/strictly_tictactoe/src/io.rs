//! Seams between the game core and the device around it.
//!
//! The core reads three active-low button lines and a millisecond clock, and
//! hands a [`Frame`] to a render sink once per tick.

use crate::machine::Frame;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Electrical level of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    /// Pulled up; the button is released.
    #[default]
    High,
    /// Shorted to ground; the button is pressed.
    Low,
}

impl Level {
    /// Buttons are wired active-low.
    pub fn is_pressed(self) -> bool {
        self == Level::Low
    }

    /// Level a line shows for the given button state.
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed { Level::Low } else { Level::High }
    }
}

/// The three physical buttons.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Button {
    /// Moves the cursor one column right, wrapping.
    Horizontal,
    /// Moves the cursor one row down, wrapping.
    Vertical,
    /// Places the current player's mark under the cursor.
    Place,
}

/// Debounced press edges seen during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonEvents {
    /// Navigate-horizontal was pressed.
    pub horizontal: bool,
    /// Navigate-vertical was pressed.
    pub vertical: bool,
    /// Place was pressed.
    pub place: bool,
}

impl ButtonEvents {
    /// A single press of one button.
    pub fn press(button: Button) -> Self {
        let mut events = Self::default();
        match button {
            Button::Horizontal => events.horizontal = true,
            Button::Vertical => events.vertical = true,
            Button::Place => events.place = true,
        }
        events
    }

    /// Returns true if any button fired.
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical || self.place
    }
}

/// Source of raw button levels.
pub trait ButtonLines {
    /// Reads the current level of one button's line.
    fn level(&mut self, button: Button) -> Level;
}

/// Free-running millisecond counter.
pub trait MonotonicClock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}

/// Consumer of per-tick frame data.
pub trait RenderSink {
    /// Draws one frame.
    fn render(&mut self, frame: &Frame<'_>);
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Creates a clock reading `start` milliseconds.
    pub fn new(start: u64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Moves time forward.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Sets the absolute reading.
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl MonotonicClock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
