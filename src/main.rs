//! Application entry point for the `speedlog-report` tool.
//!
//! This binary runs the full report sequence:
//! - Initializing structured logging/tracing (to stderr)
//! - Loading configuration from environment variables or `.env`
//! - Parsing the speed-test log into a `SpeedLog`
//! - Printing the summary and grouped statistics tables to stdout
//!
//! # Environment Variables
//! - `LOG_FILE_PATH` (**required**) – speed-test log to analyse
//! - `REPORT_TIMEZONE` (optional) – bucketing zone (default: `Europe/Oslo`)
//! - `SPEEDLOG_LOG_LEVEL` (optional) – log verbosity (default: `info`)
//!
//! Configuration parsing lives in `config` and table rendering in `report`;
//! the pipeline itself is the `speedlog_report` library.
use std::{env, io::IsTerminal};

use anyhow::{Context, Result};
use dotenvy::dotenv;
use speedlog_report::SpeedLog;
use tracing_subscriber::filter::EnvFilter;

mod config;
mod report;

// ---

fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let log = SpeedLog::open_in(&cfg.log_file_path, cfg.timezone)
        .context("Failed to load speed-test log")?;

    print!("{}", report::format_report(&log));
    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// Output goes to stderr so the report on stdout can be redirected cleanly.
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY on stderr
/// - Log level from `RUST_LOG`, else `SPEEDLOG_LOG_LEVEL` (default `info`)
fn init_tracing() {
    // ---
    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stderr().is_terminal(),
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        env::var("SPEEDLOG_LOG_LEVEL")
            .ok()
            .filter(|level| !level.trim().is_empty())
            .and_then(|level| EnvFilter::try_new(level).ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    });

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
