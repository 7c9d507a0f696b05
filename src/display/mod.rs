//! The simulated 128x64 monochrome display.
//!
//! - [`PixelPanel`]: the framebuffer and drawing primitives
//! - [`PanelRenderer`]: draws game frames onto the panel
//! - [`TerminalDisplay`]: shows the panel in a terminal

mod font;
mod layout;
mod panel;
mod terminal;

pub use layout::{CellRect, PanelRenderer};
pub use panel::{PANEL_HEIGHT, PANEL_WIDTH, PixelPanel};
pub use terminal::{DisplayError, PanelView, TerminalDisplay};
