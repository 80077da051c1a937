//! Configuration loader for the `speedlog-report` binary.
//!
//! All runtime settings come from environment variables (with optional
//! `.env` file support provided by the caller) and are gathered here so the
//! rest of the binary never calls `env::var` directly.
use std::{env, path::PathBuf};

use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use speedlog_report::REFERENCE_TIMEZONE;

/// Read an optional string environment variable, falling back to a default.
macro_rules! env_or_default {
    ($var_name:expr, $default:expr) => {
        env::var($var_name).unwrap_or_else(|_| $default.to_string())
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed report configuration, immutable once loaded.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Speed-test log to analyse.
    pub log_file_path: PathBuf,

    /// Zone whose wall clock defines the hour and weekday buckets.
    pub timezone: Tz,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `LOG_FILE_PATH` – speed-test log to read
///
/// Optional:
/// - `REPORT_TIMEZONE` – IANA zone name (default: `Europe/Oslo`)
///
/// Returns an error if a required variable is missing or the zone is unknown.
pub fn load_from_env() -> Result<Config> {
    // ---
    let log_file_path = PathBuf::from(require_env!("LOG_FILE_PATH"));
    let timezone_name = env_or_default!("REPORT_TIMEZONE", REFERENCE_TIMEZONE.name());
    let timezone = timezone_name
        .parse::<Tz>()
        .map_err(|e| anyhow!("Invalid REPORT_TIMEZONE '{}': {}", timezone_name, e))?;

    Ok(Config {
        log_file_path,
        timezone,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  LOG_FILE_PATH   : {}", self.log_file_path.display());
        tracing::info!("  REPORT_TIMEZONE : {}", self.timezone);
    }
}
