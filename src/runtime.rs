//! The interactive session: boot supervisor and the poll-driven main loop.

use crate::clock::SystemClock;
use crate::config::{HandheldConfig, KeyBindings};
use crate::display::{DisplayError, PanelRenderer, TerminalDisplay};
use crate::input::{KeyAction, KeyMap, KeyboardLines};
use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use std::time::{Duration, Instant};
use strictly_tictactoe::{GameState, Handheld};
use tracing::{error, info, instrument, trace};

type Device = Handheld<KeyboardLines, SystemClock, PanelRenderer>;

/// Calls `begin` until it succeeds, sleeping `delay` after each failure.
///
/// A failed bring-up is never partially recovered: every attempt starts
/// from scratch.
pub fn boot_with_restart<T>(
    mut begin: impl FnMut() -> Result<T, DisplayError>,
    delay: Duration,
    mut sleep: impl FnMut(Duration),
) -> T {
    let mut attempt = 1u32;
    loop {
        match begin() {
            Ok(value) => return value,
            Err(err) => {
                error!(error = %err, attempt, "Display initialisation failed, restarting");
                eprintln!("{err}; restarting in {} ms", delay.as_millis());
                sleep(delay);
                attempt = attempt.saturating_add(1);
            }
        }
    }
}

/// Runs the handheld on this terminal until the user quits.
#[instrument(skip_all)]
pub fn run(config: &HandheldConfig) -> Result<()> {
    let delay = Duration::from_millis(*config.restart_delay_ms());
    let mut display = boot_with_restart(TerminalDisplay::begin, delay, std::thread::sleep);

    let lines = KeyboardLines::new(
        KeyMap::new(*config.keys()),
        Duration::from_millis(*config.press_hold_ms()),
        display.releases_reported(),
    );
    let mut device = Handheld::new(
        lines,
        SystemClock::new(),
        PanelRenderer::new(),
        GameState::with_reset_delay(*config.reset_delay_ms()),
    );

    let result = main_loop(&mut display, &mut device, config);
    display.end().context("Failed to restore terminal")?;
    result
}

fn main_loop(
    display: &mut TerminalDisplay,
    device: &mut Device,
    config: &HandheldConfig,
) -> Result<()> {
    let tick = Duration::from_millis(*config.tick_ms());
    let help = help_line(config.keys());
    info!(tick_ms = tick.as_millis(), "Handheld running");

    loop {
        if poll_keys(device.lines_mut(), tick)? == KeyAction::Quit {
            info!("Power off requested");
            return Ok(());
        }
        device.tick();
        display
            .present(device.sink().panel(), &help)
            .context("Failed to draw panel")?;
    }
}

/// Waits up to `timeout` for input, then drains whatever else is queued.
fn poll_keys(lines: &mut KeyboardLines, timeout: Duration) -> Result<KeyAction> {
    let mut wait = timeout;
    while event::poll(wait)? {
        wait = Duration::ZERO;
        if let Event::Key(key) = event::read()? {
            trace!(?key, "Key event");
            if lines.handle_key(key, Instant::now()) == KeyAction::Quit {
                return Ok(KeyAction::Quit);
            }
        }
    }
    Ok(KeyAction::Ignored)
}

/// Key hints shown under the panel.
pub fn help_line(keys: &KeyBindings) -> String {
    format!(
        " {}/→ right   {}/↓ down   {}/⏎ place   q quit",
        keys.horizontal(),
        keys.vertical(),
        keys.place()
    )
}
