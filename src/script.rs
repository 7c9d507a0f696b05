//! Headless runs of a fixed button sequence.
//!
//! Each press holds its line low for one tick and releases it for the next,
//! on a manual clock advanced by the configured tick length.

use crate::config::HandheldConfig;
use crate::display::{PanelRenderer, PixelPanel};
use derive_more::{Display, Error};
use serde::Serialize;
use std::str::FromStr;
use strictly_tictactoe::{
    Button, ButtonLines, GameState, Handheld, Level, ManualClock, MonotonicClock, Outcome, Phase,
    Player, Position,
};
use tracing::{debug, instrument, trace};

/// One step of a button script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    /// Press and release a button.
    Press(Button),
    /// Let time pass with every button released.
    Wait(u64),
}

/// A script token that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid script step {:?}: {}", token, reason)]
pub struct ScriptError {
    /// The offending token.
    pub token: String,
    /// Why it was rejected.
    pub reason: &'static str,
}

impl FromStr for ScriptStep {
    type Err = ScriptError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let fail = |reason| ScriptError {
            token: token.to_string(),
            reason,
        };

        match token.to_ascii_lowercase().as_str() {
            "h" | "horizontal" | "right" => Ok(ScriptStep::Press(Button::Horizontal)),
            "v" | "vertical" | "down" => Ok(ScriptStep::Press(Button::Vertical)),
            "p" | "place" => Ok(ScriptStep::Press(Button::Place)),
            other => match other.strip_prefix("wait:") {
                Some(ms) => ms
                    .parse()
                    .map(ScriptStep::Wait)
                    .map_err(|_| fail("wait needs a millisecond count, e.g. wait:3000")),
                None => Err(fail("expected h, v, p or wait:<ms>")),
            },
        }
    }
}

/// Parses a whitespace- or comma-separated script.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

/// Final state after a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptReport {
    /// Board in `XXX/OO./...` notation.
    pub board: String,
    /// Highlighted cell.
    pub cursor: Position,
    /// Player to move.
    pub to_move: Player,
    /// Outcome derived from the board.
    pub outcome: Outcome,
    /// Game phase.
    pub phase: Phase,
    /// Ticks simulated.
    pub ticks: u64,
    /// Simulated time elapsed.
    pub elapsed_ms: u64,
}

/// Report plus the panel as it was last drawn.
#[derive(Debug, Clone)]
pub struct ScriptRun {
    /// Final state.
    pub report: ScriptReport,
    /// Final panel contents.
    pub panel: PixelPanel,
}

/// Lines with at most one button held.
#[derive(Debug, Default)]
struct HeldButton(Option<Button>);

impl ButtonLines for HeldButton {
    fn level(&mut self, button: Button) -> Level {
        Level::from_pressed(self.0 == Some(button))
    }
}

type ScriptDevice = Handheld<HeldButton, ManualClock, PanelRenderer>;

fn step(device: &mut ScriptDevice, held: Option<Button>, tick_ms: u64, ticks: &mut u64) {
    device.lines_mut().0 = held;
    device.tick();
    device.clock().advance(tick_ms);
    *ticks = ticks.saturating_add(1);
}

/// Idle ticks from `now_ms` on that leave the game and the panel unchanged.
///
/// Assumes every line is released and was already sampled released.
fn quiet_ticks(game: &GameState, now_ms: u64, tick_ms: u64) -> u64 {
    match game.ended_at() {
        Some(ended_at) => ended_at
            .saturating_add(game.reset_delay_ms())
            .saturating_sub(now_ms)
            .div_ceil(tick_ms),
        None if game.frame().outcome.is_in_progress() => u64::MAX,
        // A finished game that has not latched its end yet.
        None => 0,
    }
}

/// Runs `steps` against a fresh game.
#[instrument(skip(steps, config), fields(steps = steps.len()))]
pub fn run_script(steps: &[ScriptStep], config: &HandheldConfig) -> ScriptRun {
    let tick_ms = *config.tick_ms();
    let mut device = Handheld::new(
        HeldButton::default(),
        ManualClock::new(0),
        PanelRenderer::new(),
        GameState::with_reset_delay(*config.reset_delay_ms()),
    );
    let mut ticks = 0;

    // Initial frame so an empty script still draws the board.
    step(&mut device, None, tick_ms, &mut ticks);
    for script_step in steps {
        debug!(step = ?script_step, "Script step");
        match *script_step {
            ScriptStep::Press(button) => {
                step(&mut device, Some(button), tick_ms, &mut ticks);
                step(&mut device, None, tick_ms, &mut ticks);
            }
            ScriptStep::Wait(ms) => {
                let mut remaining = ms.div_ceil(tick_ms);
                while remaining > 0 {
                    let now_ms = device.clock().now_ms();
                    let skip = quiet_ticks(device.game(), now_ms, tick_ms).min(remaining);
                    if skip > 0 {
                        trace!(skip, "Fast-forwarding idle ticks");
                        device.clock().advance(skip.saturating_mul(tick_ms));
                        ticks = ticks.saturating_add(skip);
                        remaining -= skip;
                    } else {
                        step(&mut device, None, tick_ms, &mut ticks);
                        remaining -= 1;
                    }
                }
            }
        }
    }

    let frame = device.game().frame();
    let report = ScriptReport {
        board: frame.board.to_string(),
        cursor: frame.cursor,
        to_move: frame.to_move,
        outcome: frame.outcome,
        phase: frame.phase,
        ticks,
        elapsed_ms: device.clock().now_ms(),
    };
    ScriptRun {
        report,
        panel: device.sink().panel().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_tictactoe::ButtonEvents;

    #[test]
    fn test_parse_tokens() {
        let steps = parse_script("h, v p  wait:250 Place").unwrap();
        assert_eq!(
            steps,
            vec![
                ScriptStep::Press(Button::Horizontal),
                ScriptStep::Press(Button::Vertical),
                ScriptStep::Press(Button::Place),
                ScriptStep::Wait(250),
                ScriptStep::Press(Button::Place),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_token() {
        let err = parse_script("h jump").unwrap_err();
        assert_eq!(err.token, "jump");
        assert!(parse_script("wait:soon").is_err());
    }

    #[test]
    fn test_huge_wait_finishes() {
        let run = run_script(&[ScriptStep::Wait(u64::MAX)], &HandheldConfig::default());
        assert_eq!(run.report.board, ".../.../...");
        assert_eq!(run.report.phase, Phase::Playing);
        assert_eq!(run.report.ticks, 1 + u64::MAX.div_ceil(10));
    }

    #[test]
    fn test_quiet_ticks_by_phase() {
        let mut game = GameState::with_reset_delay(100);
        assert_eq!(quiet_ticks(&game, 0, 10), u64::MAX);

        let top_row = [
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
        for button in top_row {
            game.tick(ButtonEvents::press(button), 0);
        }
        // Won, but the end latches on the next tick.
        assert_eq!(quiet_ticks(&game, 0, 10), 0);

        game.tick(ButtonEvents::default(), 50);
        assert_eq!(quiet_ticks(&game, 60, 10), 9);
        assert_eq!(quiet_ticks(&game, 150, 10), 0);
    }

    #[test]
    fn test_wait_skips_to_reset_deadline() {
        let config = HandheldConfig::default();
        let script = "p v p v v h p v p v v h p";
        let won = run_script(&parse_script(script).unwrap(), &config).report;
        assert_eq!(won.phase, Phase::Ended);

        let steps = parse_script(&format!("{script} wait:2990")).unwrap();
        let frozen = run_script(&steps, &config);
        assert_eq!(frozen.report.phase, Phase::Ended);
        assert_eq!(frozen.report.ticks, won.ticks + 299);

        let steps = parse_script(&format!("{script} wait:1000000")).unwrap();
        let reset = run_script(&steps, &config).report;
        assert_eq!(reset.phase, Phase::Playing);
        assert_eq!(reset.board, ".../.../...");
        assert_eq!(reset.ticks, won.ticks + 100_000);
        assert_eq!(reset.elapsed_ms, won.elapsed_ms + 1_000_000);
    }

    #[test]
    fn test_empty_script_draws_empty_board() {
        let run = run_script(&[], &HandheldConfig::default());
        assert_eq!(run.report.board, ".../.../...");
        assert_eq!(run.report.ticks, 1);
        assert!(run.panel.lit_count() > 0);
    }
}
