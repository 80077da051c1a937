//! Field extraction from a single record block.
//!
//! Each field is matched independently by its line prefix, so field lines
//! may appear in any order and unrelated lines are ignored.

use std::sync::LazyLock;

use chrono_tz::Tz;
use regex::Regex;

use crate::datetime;
use crate::error::ParseError;
use crate::models::Record;

static START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Speed test start: (.+)").expect("Invalid regex pattern"));

static DOWNLOAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Download: (.*) Mbps").expect("Invalid regex pattern"));

static UPLOAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Upload: (.*) Mbps").expect("Invalid regex pattern"));

/// Greedy: everything up to the last ` -` on the line is the server name.
static SERVER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Server: (.*) -").expect("Invalid regex pattern"));

/// Leading numeric prefix of a speed value, e.g. `93.41` in `93.41 (avg)`.
static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("Invalid regex pattern")
});

// ---

/// Parse one record block, localizing its timestamp to `tz`.
///
/// Missing or unreadable speeds become `0.0` and are left for the validity
/// filter; a missing server line yields `None`. Only the timestamp is
/// mandatory.
pub fn parse_block(block: &str, tz: Tz) -> Result<Record, ParseError> {
    // ---
    let timestamp = parse_timestamp(block, tz)?;

    Ok(Record {
        display_datetime: datetime::display(&timestamp),
        timestamp,
        download_speed: parse_speed(&DOWNLOAD_REGEX, block),
        upload_speed: parse_speed(&UPLOAD_REGEX, block),
        server: parse_server(block),
    })
}

fn parse_timestamp(block: &str, tz: Tz) -> Result<chrono::DateTime<Tz>, ParseError> {
    // ---
    let raw = capture(&START_REGEX, block).ok_or(ParseError::MissingTimestamp)?;
    datetime::parse_freeform(raw, tz)
        .ok_or_else(|| ParseError::UnparseableTimestamp(raw.trim().to_string()))
}

fn parse_speed(regex: &Regex, block: &str) -> f64 {
    capture(regex, block).map(leading_number).unwrap_or(0.0)
}

fn parse_server(block: &str) -> Option<String> {
    // ---
    let name = capture(&SERVER_REGEX, block)?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn capture<'a>(regex: &Regex, block: &'a str) -> Option<&'a str> {
    regex
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Numeric prefix of `text` as a float, `0.0` if there is none.
fn leading_number(text: &str) -> f64 {
    NUMBER_REGEX
        .find(text.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
