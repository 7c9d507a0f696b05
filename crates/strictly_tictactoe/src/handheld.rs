//! Wiring of the game core to its input lines, clock and render sink.

use crate::debounce::ButtonBank;
use crate::io::{ButtonEvents, ButtonLines, MonotonicClock, RenderSink};
use crate::machine::GameState;
use tracing::instrument;

/// One handheld: three buttons, a clock, a display and the game they drive.
#[derive(Debug)]
pub struct Handheld<L, C, R> {
    lines: L,
    clock: C,
    sink: R,
    buttons: ButtonBank,
    game: GameState,
}

impl<L, C, R> Handheld<L, C, R>
where
    L: ButtonLines,
    C: MonotonicClock,
    R: RenderSink,
{
    /// Assembles a handheld around an existing game state.
    pub fn new(lines: L, clock: C, sink: R, game: GameState) -> Self {
        Self {
            lines,
            clock,
            sink,
            buttons: ButtonBank::new(),
            game,
        }
    }

    /// Samples the buttons, advances the game and renders the result.
    #[instrument(level = "trace", skip(self))]
    pub fn tick(&mut self) -> ButtonEvents {
        let lines = &mut self.lines;
        let events = self.buttons.sample(|button| lines.level(button));
        let now_ms = self.clock.now_ms();
        let frame = self.game.tick(events, now_ms);
        self.sink.render(&frame);
        events
    }

    /// Returns the game state.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Returns the input lines.
    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }

    /// Returns the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the render sink.
    pub fn sink(&self) -> &R {
        &self.sink
    }
}
