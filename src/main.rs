//! Strictly Handheld - simulator binary
//!
//! Plays on the terminal, or runs a button script headlessly.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_handheld::{HandheldConfig, parse_script, run_script, runtime};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,strictly_handheld=debug";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = HandheldConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            init_file_logging(config.log_file())?;
            info!(config = %cli.config.display(), "Starting Strictly Handheld");
            runtime::run(&config)
        }
        Command::Script {
            presses,
            json,
            tick_ms,
        } => {
            init_stderr_logging();
            let config = match tick_ms {
                Some(tick_ms) => config.with_tick_ms(tick_ms)?,
                None => config,
            };
            run_script_command(&presses, json, &config)
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logs to a file so the panel keeps the terminal to itself.
fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Logs to stderr; stdout carries the script output.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_script_command(presses: &str, json: bool, config: &HandheldConfig) -> Result<()> {
    let steps = parse_script(presses)?;
    let run = run_script(&steps, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&run.report)?);
    } else {
        print!("{}", run.panel.to_ascii());
        println!(
            "{} | cursor {} | {} to move | {:?} after {} ms",
            run.report.outcome,
            run.report.cursor,
            run.report.to_move,
            run.report.phase,
            run.report.elapsed_ms
        );
    }
    Ok(())
}
