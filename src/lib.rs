//! Strictly Handheld - host simulator for the three-button tic-tac-toe device
//!
//! The game itself lives in `strictly_tictactoe`; this crate supplies the
//! hardware it expects.
//!
//! # Architecture
//!
//! - **Display**: 128x64 pixel panel, the board renderer, and its terminal view
//! - **Input**: keyboard keys standing in for the three active-low buttons
//! - **Clock**: monotonic milliseconds from [`std::time::Instant`]
//! - **Runtime**: boot supervisor and the interactive loop
//! - **Script**: headless runs of a fixed press sequence
//!
//! # Example
//!
//! ```
//! use strictly_handheld::{HandheldConfig, parse_script, run_script};
//!
//! let steps = parse_script("p h p").unwrap();
//! let run = run_script(&steps, &HandheldConfig::default());
//! assert_eq!(run.report.board, "XO./.../...");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod config;
mod input;
mod script;

pub mod display;
pub mod runtime;

// Crate-level exports - Configuration
pub use config::{ConfigError, HandheldConfig, KeyBindings};

// Crate-level exports - Host hardware
pub use clock::SystemClock;
pub use input::{KeyAction, KeyMap, KeyboardLines};

// Crate-level exports - Headless runs
pub use script::{ScriptError, ScriptReport, ScriptRun, ScriptStep, parse_script, run_script};
