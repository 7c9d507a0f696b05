//! Command-line interface for strictly_handheld.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Handheld - three-button tic-tac-toe on a simulated 128x64 panel
#[derive(Parser, Debug)]
#[command(name = "strictly_handheld")]
#[command(about = "Three-button tic-tac-toe on a simulated 128x64 panel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the handheld config (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = "handheld.toml")]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play on this terminal
    Play,

    /// Run a button script headlessly and print the final panel
    Script {
        /// Presses separated by spaces or commas: h, v, p, wait:<ms>
        presses: String,

        /// Print the final frame as JSON instead of the panel
        #[arg(long)]
        json: bool,

        /// Simulated tick length, overriding the config
        #[arg(long)]
        tick_ms: Option<u64>,
    },
}
