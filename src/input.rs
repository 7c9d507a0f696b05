//! Keyboard stand-in for the three active-low button lines.
//!
//! A key press pulls its line low. When the terminal reports key releases
//! the line stays low until the release arrives; otherwise it is released
//! after a fixed hold time, extended by auto-repeat.

use crate::config::KeyBindings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use strictly_tictactoe::{Button, ButtonLines, Level};
use tracing::{debug, instrument};

/// What a key event meant to the handheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A button line changed.
    Button(Button),
    /// The user asked to power off.
    Quit,
    /// Not bound to anything.
    Ignored,
}

/// Maps key codes to buttons.
#[derive(Debug, Clone, Copy)]
pub struct KeyMap {
    bindings: KeyBindings,
}

impl KeyMap {
    /// Creates a map from configured bindings.
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// Resolves a key event, including the fixed arrow/enter alternates.
    pub fn resolve(&self, key: &KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            KeyCode::Right => KeyAction::Button(Button::Horizontal),
            KeyCode::Down => KeyAction::Button(Button::Vertical),
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Button(Button::Place),
            KeyCode::Char(c) => {
                let c = c.to_ascii_lowercase();
                if c == self.bindings.horizontal().to_ascii_lowercase() {
                    KeyAction::Button(Button::Horizontal)
                } else if c == self.bindings.vertical().to_ascii_lowercase() {
                    KeyAction::Button(Button::Vertical)
                } else if c == self.bindings.place().to_ascii_lowercase() {
                    KeyAction::Button(Button::Place)
                } else {
                    KeyAction::Ignored
                }
            }
            _ => KeyAction::Ignored,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hold {
    Released,
    Until(Instant),
    UntilRelease,
}

/// Button lines driven by terminal key events.
#[derive(Debug, Clone)]
pub struct KeyboardLines {
    keymap: KeyMap,
    hold: Duration,
    releases_reported: bool,
    lines: [Hold; 3],
    /// Pressed since the last sample; a tap shorter than a tick still lands.
    unsampled: [bool; 3],
}

fn slot(button: Button) -> usize {
    match button {
        Button::Horizontal => 0,
        Button::Vertical => 1,
        Button::Place => 2,
    }
}

impl KeyboardLines {
    /// Creates released lines.
    ///
    /// `releases_reported` says whether the terminal sends key-release
    /// events; without them a press lasts `hold`.
    #[instrument(skip(keymap))]
    pub fn new(keymap: KeyMap, hold: Duration, releases_reported: bool) -> Self {
        Self {
            keymap,
            hold,
            releases_reported,
            lines: [Hold::Released; 3],
            unsampled: [false; 3],
        }
    }

    /// Applies a key event observed at `now`.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> KeyAction {
        let action = self.keymap.resolve(&key);
        let KeyAction::Button(button) = action else {
            if action == KeyAction::Quit && key.kind == KeyEventKind::Release {
                return KeyAction::Ignored;
            }
            return action;
        };

        let slot = slot(button);
        if key.kind == KeyEventKind::Press {
            self.unsampled[slot] = true;
        }
        self.lines[slot] = match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat if self.releases_reported => {
                Hold::UntilRelease
            }
            KeyEventKind::Press | KeyEventKind::Repeat => Hold::Until(now + self.hold),
            KeyEventKind::Release => Hold::Released,
        };
        debug!(%button, kind = ?key.kind, "Button line changed");
        action
    }

    /// Level of a line as seen at `now`, without consuming a pending press.
    pub fn level_at(&self, button: Button, now: Instant) -> Level {
        let slot = slot(button);
        let held = match self.lines[slot] {
            Hold::Released => false,
            Hold::Until(deadline) => now < deadline,
            Hold::UntilRelease => true,
        };
        Level::from_pressed(held || self.unsampled[slot])
    }
}

impl ButtonLines for KeyboardLines {
    fn level(&mut self, button: Button) -> Level {
        let level = self.level_at(button, Instant::now());
        self.unsampled[slot(button)] = false;
        level
    }
}
