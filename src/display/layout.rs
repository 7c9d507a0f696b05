//! Draws game frames onto the 128x64 panel.
//!
//! The board fills the left half as a 3x3 grid of 21 px cells; the right
//! half is the status area.

use super::panel::{PANEL_HEIGHT, PANEL_WIDTH, PixelPanel};
use strictly_tictactoe::{Frame, Outcome, Player, Position, RenderSink};
use tracing::instrument;

const HALF_WIDTH: i32 = PANEL_WIDTH as i32 / 2;
const HALF_HEIGHT: i32 = PANEL_HEIGHT as i32 / 2;
const CELL_WIDTH: i32 = HALF_WIDTH / 3;
const CELL_HEIGHT: i32 = PANEL_HEIGHT as i32 / 3;
const STATUS_LABEL_Y: i32 = 7;
const STATUS_GLYPH_X: i32 = HALF_WIDTH + HALF_WIDTH / 2 - 3;

/// Screen rectangle of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl CellRect {
    /// Rectangle for a board position.
    pub fn of(position: Position) -> Self {
        // Row and column are at most 2.
        let row = position.row() as i32;
        let column = position.column() as i32;
        Self {
            x: column * CELL_WIDTH,
            y: row * CELL_HEIGHT,
            w: CELL_WIDTH,
            h: CELL_HEIGHT,
        }
    }

    /// Centre point, where strike-through lines start and end.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Where a size-1 mark is drawn so it sits in the middle of the cell.
    pub fn mark_origin(&self) -> (i32, i32) {
        (self.x + self.w / 2 - 2, self.y + self.h / 2 - 3)
    }
}

/// Render sink that draws each frame into a [`PixelPanel`].
#[derive(Debug, Clone, Default)]
pub struct PanelRenderer {
    panel: PixelPanel,
}

impl PanelRenderer {
    /// Creates a renderer with a blank 128x64 panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// The panel as of the last rendered frame.
    pub fn panel(&self) -> &PixelPanel {
        &self.panel
    }

    fn draw_board(&mut self, frame: &Frame<'_>) {
        for position in Position::ALL {
            let rect = CellRect::of(position);
            self.panel.draw_rect(rect.x, rect.y, rect.w, rect.h);
            if position == frame.cursor {
                self.panel.draw_rect(rect.x + 1, rect.y + 1, rect.w - 2, rect.h - 2);
            }

            if let Some(player) = frame.board.get(position).player() {
                let (x, y) = rect.mark_origin();
                self.panel.draw_char(x, y, player.symbol(), 1);
            }
        }
    }

    fn draw_current_player(&mut self, player: Player) {
        self.panel.draw_text(HALF_WIDTH + 11, STATUS_LABEL_Y, "Current:", 1);
        self.panel.draw_char(STATUS_GLYPH_X, HALF_HEIGHT, player.symbol(), 2);
    }

    fn draw_winner(&mut self, player: Player) {
        self.panel.draw_text(HALF_WIDTH + 13, STATUS_LABEL_Y, "Winner:", 1);
        self.panel.draw_char(STATUS_GLYPH_X, HALF_HEIGHT, player.symbol(), 2);
    }

    fn draw_strike(&mut self, from: Position, to: Position) {
        let (x0, y0) = CellRect::of(from).center();
        let (x1, y1) = CellRect::of(to).center();
        self.panel.draw_line(x0, y0, x1, y1);
    }

    fn draw_draw(&mut self) {
        self.panel.draw_text(HALF_WIDTH + 21, STATUS_LABEL_Y, "Draw!", 1);
        self.panel.draw_text(HALF_WIDTH + HALF_WIDTH / 2 - 13, HALF_HEIGHT, ":3", 2);
    }
}

impl RenderSink for PanelRenderer {
    #[instrument(level = "trace", skip_all, fields(outcome = %frame.outcome))]
    fn render(&mut self, frame: &Frame<'_>) {
        self.panel.clear();
        self.draw_board(frame);

        match frame.outcome {
            Outcome::InProgress => self.draw_current_player(frame.to_move),
            Outcome::Win(win) => {
                self.draw_winner(win.player);
                self.draw_strike(win.line.start(), win.line.end());
            }
            Outcome::Draw => self.draw_draw(),
        }
    }
}
