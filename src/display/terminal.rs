//! Terminal presentation of the pixel panel.
//!
//! Two pixel rows share one terminal row using half-block characters, so the
//! 128x64 panel needs 128x32 cells plus a border and a help line.

use super::panel::{PANEL_HEIGHT, PANEL_WIDTH, PixelPanel};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use derive_more::{Display, Error};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Paragraph, Widget},
};
use std::io::{self, Stdout};
use tracing::{debug, info, instrument, warn};

/// Terminal columns needed for the bordered panel.
pub const REQUIRED_COLS: u16 = PANEL_WIDTH + 2;
/// Terminal rows needed for the bordered panel and the help line.
pub const REQUIRED_ROWS: u16 = PANEL_HEIGHT / 2 + 2 + 1;

/// Failure to bring up or drive the display.
#[derive(Debug, Display, Error)]
pub enum DisplayError {
    /// The terminal is too small to show the whole panel.
    #[display("Panel needs a {needed_cols}x{needed_rows} terminal, found {cols}x{rows}")]
    DoesNotFit {
        /// Columns required.
        needed_cols: u16,
        /// Rows required.
        needed_rows: u16,
        /// Columns available.
        cols: u16,
        /// Rows available.
        rows: u16,
    },
    /// Terminal I/O failed.
    #[display("Terminal I/O failed: {_0}")]
    Io(io::Error),
}

impl From<io::Error> for DisplayError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Checks that a terminal of `cols` x `rows` can show the panel.
pub fn check_fits(cols: u16, rows: u16) -> Result<(), DisplayError> {
    if cols < REQUIRED_COLS || rows < REQUIRED_ROWS {
        return Err(DisplayError::DoesNotFit {
            needed_cols: REQUIRED_COLS,
            needed_rows: REQUIRED_ROWS,
            cols,
            rows,
        });
    }
    Ok(())
}

/// Widget drawing a [`PixelPanel`] with half-block characters.
#[derive(Debug, Clone)]
pub struct PanelView<'a> {
    panel: &'a PixelPanel,
    block: Option<Block<'a>>,
}

impl<'a> PanelView<'a> {
    /// Wraps a panel.
    pub fn new(panel: &'a PixelPanel) -> Self {
        Self { panel, block: None }
    }

    /// Surrounds the panel with a block.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for PanelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        let rows = inner.height.min(self.panel.height().div_ceil(2));
        let cols = inner.width.min(self.panel.width());
        for ty in 0..rows {
            for tx in 0..cols {
                let x = i32::from(tx);
                let top = self.panel.pixel(x, i32::from(ty) * 2);
                let bottom = self.panel.pixel(x, i32::from(ty) * 2 + 1);
                let ch = match (top, bottom) {
                    (false, false) => ' ',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (true, true) => '█',
                };
                if let Some(cell) = buf.cell_mut((inner.x + tx, inner.y + ty)) {
                    cell.set_char(ch);
                }
            }
        }
    }
}

/// The terminal, in raw mode on the alternate screen, showing the panel.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    releases_reported: bool,
    active: bool,
}

impl TerminalDisplay {
    /// Brings the display up.
    ///
    /// Fails without touching the terminal if it is too small for the panel.
    #[instrument]
    pub fn begin() -> Result<Self, DisplayError> {
        let (cols, rows) = crossterm::terminal::size()?;
        check_fits(cols, rows)?;

        enable_raw_mode()?;
        match Self::enter_screen() {
            Ok((terminal, releases_reported)) => {
                info!(cols, rows, releases_reported, "Display initialised");
                Ok(Self {
                    terminal,
                    releases_reported,
                    active: true,
                })
            }
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                Err(err)
            }
        }
    }

    fn enter_screen() -> Result<(Terminal<CrosstermBackend<Stdout>>, bool), DisplayError> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let releases_reported = matches!(supports_keyboard_enhancement(), Ok(true));
        if releases_reported {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok((terminal, releases_reported))
    }

    /// Whether key releases arrive as events.
    pub fn releases_reported(&self) -> bool {
        self.releases_reported
    }

    /// Pushes the panel to the terminal, with `help` underneath.
    pub fn present(&mut self, panel: &PixelPanel, help: &str) -> Result<(), DisplayError> {
        self.terminal.draw(|f| {
            let area = f.area();
            let width = REQUIRED_COLS.min(area.width);
            let centered = Rect {
                x: area.x + (area.width - width) / 2,
                width,
                ..area
            };
            let [panel_area, help_area] = Layout::vertical([
                Constraint::Length(REQUIRED_ROWS - 1),
                Constraint::Length(1),
            ])
            .areas(centered);

            let view = PanelView::new(panel)
                .block(Block::bordered().title(" Strictly Handheld "));
            f.render_widget(view, panel_area);
            f.render_widget(Paragraph::new(help), help_area);
        })?;
        Ok(())
    }

    /// Restores the terminal. Safe to call more than once.
    #[instrument(skip(self))]
    pub fn end(&mut self) -> Result<(), DisplayError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        if self.releases_reported {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        debug!("Display shut down");
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(err) = self.end() {
            warn!(error = %err, "Failed to restore terminal");
        }
    }
}
