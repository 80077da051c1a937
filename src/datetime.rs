//! Permissive parsing of the free-form timestamps found in speed-test logs.
//!
//! Logs are written by shell scripts, so the start line may hold `date(1)`
//! output, an ISO-like stamp, an RFC 2822 header date, or something close to
//! one of those. Every accepted value is converted to an absolute instant and
//! then localized to the reference zone with its full DST rules.

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone,
};
use chrono_tz::Tz;

/// Zone used for bucketing and display unless configured otherwise.
pub const REFERENCE_TIMEZONE: Tz = chrono_tz::Europe::Oslo;

/// Layout of `Record::display_datetime`.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S (%Z)";

/// Wall-clock layouts tried after zone and offset handling.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%a %b %d %H:%M:%S %Y",
    "%a, %d %b %Y %H:%M:%S",
    "%a %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%b %d %Y %H:%M:%S",
];

/// Layouts carrying a numeric UTC offset.
const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%a %b %d %H:%M:%S %z %Y",
    "%a %b %d %H:%M:%S %Y %z",
    "%a, %d %b %Y %H:%M:%S %z",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// Abbreviations accepted in place of a numeric offset, in seconds east of UTC.
const ZONE_ABBREVIATIONS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("UT", 0),
    ("Z", 0),
    ("WET", 0),
    ("WEST", 3600),
    ("BST", 3600),
    ("CET", 3600),
    ("CEST", 7200),
    ("EET", 7200),
    ("EEST", 10800),
    ("EST", -5 * 3600),
    ("EDT", -4 * 3600),
    ("CST", -6 * 3600),
    ("CDT", -5 * 3600),
    ("MST", -7 * 3600),
    ("MDT", -6 * 3600),
    ("PST", -8 * 3600),
    ("PDT", -7 * 3600),
];

// ---

/// Parse free-form date/time text and localize it to `tz`.
///
/// Text with an explicit offset or a known zone abbreviation is anchored to
/// that offset. Text without one is read as wall-clock time in `tz`.
/// Returns `None` when no supported layout matches.
pub fn parse_freeform(text: &str, tz: Tz) -> Option<DateTime<Tz>> {
    // ---
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Some(dt.with_timezone(&tz));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(&text) {
        return Some(dt.with_timezone(&tz));
    }
    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(&text, layout) {
            return Some(dt.with_timezone(&tz));
        }
    }

    let (text, offset) = strip_zone_abbreviation(&text);
    let naive = parse_naive(&text)?;

    match offset {
        Some(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&tz)),
        None => localize(naive, tz),
    }
}

/// Format an instant the way records display it, e.g. `2023-01-01 10:00:00 (CET)`.
pub fn display(timestamp: &DateTime<Tz>) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}

// ---

/// Remove the first token naming a known zone and return its offset.
fn strip_zone_abbreviation(text: &str) -> (String, Option<FixedOffset>) {
    // ---
    let mut offset = None;
    let mut kept = Vec::new();

    for token in text.split_whitespace() {
        if offset.is_none() {
            let name = token.trim_matches(|c| c == '(' || c == ')');
            if let Some(found) = lookup_abbreviation(name) {
                offset = Some(found);
                continue;
            }
        }
        kept.push(token);
    }

    (kept.join(" "), offset)
}

fn lookup_abbreviation(name: &str) -> Option<FixedOffset> {
    ZONE_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(name))
        .and_then(|(_, secs)| FixedOffset::east_opt(*secs))
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    // ---
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Resolve a wall-clock time in `tz`.
///
/// Times repeated by the autumn fold take the earlier instant; times skipped
/// by the spring gap move forward by an hour.
fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    // ---
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest(),
    }
}
