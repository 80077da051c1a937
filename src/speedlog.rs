//! The speed-log pipeline: split, parse, filter and bucket in one pass.
//!
//! A [`SpeedLog`] is built once from the whole input and is read-only after
//! that. Queries derive their statistics from the stored buckets on every
//! call.

use std::{borrow::Cow, collections::BTreeMap, fs, path::Path};

use chrono_tz::Tz;
use tracing::{debug, info, info_span, warn};

use crate::datetime::REFERENCE_TIMEZONE;
use crate::error::{MalformedBlock, SpeedLogError};
use crate::models::{Average, GroupStats, Record, SpeedPair};
use crate::parser::parse_block;
use crate::splitter::{split_blocks, RECORD_DELIMITER};
use crate::stats;

/// Speed pairs grouped under a zero-padded key, in insertion order.
type Buckets = BTreeMap<String, Vec<SpeedPair>>;

/// Bucket selection for [`SpeedLog::group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Local hour of day, keys `"00"` to `"23"`.
    Hour,
    /// ISO weekday, keys `"1"` (Monday) to `"7"` (Sunday).
    Weekday,
}

impl Grouping {
    /// chrono format producing this grouping's key.
    fn key_format(self) -> &'static str {
        match self {
            Grouping::Hour => "%H",
            Grouping::Weekday => "%u",
        }
    }
}

/// Parsed speed-test log with its hour and weekday buckets.
#[derive(Debug, Clone)]
pub struct SpeedLog {
    // ---
    records: Vec<Record>,
    servers: Vec<String>,
    by_hour: Buckets,
    by_weekday: Buckets,
    malformed: Vec<MalformedBlock>,
    dropped_invalid: usize,
}

impl SpeedLog {
    // ---

    /// Read and parse the log at `path` using the reference zone.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SpeedLogError> {
        Self::open_in(path, REFERENCE_TIMEZONE)
    }

    /// Read and parse the log at `path`, bucketing by wall-clock time in `tz`.
    pub fn open_in(path: impl AsRef<Path>, tz: Tz) -> Result<Self, SpeedLogError> {
        // ---
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| SpeedLogError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Read {} bytes from {}", bytes.len(), path.display());

        // Stray non-UTF-8 bytes (e.g. Latin-1 server names) become U+FFFD
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!("{} is not valid UTF-8, invalid bytes were replaced", path.display());
        }
        Ok(Self::from_content(&content, tz))
    }

    /// Parse log text already in memory.
    pub fn from_content(content: &str, tz: Tz) -> Self {
        // ---
        let _span = info_span!("speedlog", tz = %tz).entered();

        let mut log = SpeedLog {
            records: Vec::new(),
            servers: Vec::new(),
            by_hour: Buckets::new(),
            by_weekday: Buckets::new(),
            malformed: Vec::new(),
            dropped_invalid: 0,
        };

        for (index, block) in split_blocks(content, RECORD_DELIMITER).into_iter().enumerate() {
            match parse_block(block, tz) {
                Ok(record) if record.is_valid() => log.enrich(record),
                Ok(record) => {
                    debug!(
                        "Dropping block {} ({}): download {} / upload {}",
                        index, record.display_datetime, record.download_speed, record.upload_speed
                    );
                    log.dropped_invalid += 1;
                }
                Err(error) => {
                    warn!("Skipping malformed block {}: {}", index, error);
                    log.malformed.push(MalformedBlock { index, error });
                }
            }
        }

        info!(
            "Parsed {} records ({} without valid speeds, {} malformed) from {} servers",
            log.records.len(),
            log.dropped_invalid,
            log.malformed.len(),
            log.servers.len()
        );
        log
    }

    /// Register a valid record's server and speeds, then keep the record.
    fn enrich(&mut self, record: Record) {
        // ---
        if let Some(server) = &record.server {
            if !self.servers.contains(server) {
                self.servers.push(server.clone());
            }
        }

        let pair = record.speed_pair();
        for grouping in [Grouping::Hour, Grouping::Weekday] {
            let key = record.timestamp.format(grouping.key_format()).to_string();
            self.buckets_mut(grouping).entry(key).or_default().push(pair);
        }

        self.records.push(record);
    }

    fn buckets(&self, grouping: Grouping) -> &Buckets {
        match grouping {
            Grouping::Hour => &self.by_hour,
            Grouping::Weekday => &self.by_weekday,
        }
    }

    fn buckets_mut(&mut self, grouping: Grouping) -> &mut Buckets {
        match grouping {
            Grouping::Hour => &mut self.by_hour,
            Grouping::Weekday => &mut self.by_weekday,
        }
    }

    // ---

    /// Valid records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct server names of valid records, in first-seen order.
    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    pub fn servers_joined(&self, separator: &str) -> String {
        self.servers.join(separator)
    }

    /// Display date of the first valid record.
    pub fn first_record_date(&self) -> Option<&str> {
        self.records.first().map(|r| r.display_datetime.as_str())
    }

    /// Display date of the last valid record.
    pub fn latest_record_date(&self) -> Option<&str> {
        self.records.last().map(|r| r.display_datetime.as_str())
    }

    /// Blocks skipped because they could not be parsed.
    pub fn malformed(&self) -> &[MalformedBlock] {
        &self.malformed
    }

    /// Number of parsed blocks dropped for a missing or non-positive speed.
    pub fn dropped_invalid(&self) -> usize {
        self.dropped_invalid
    }

    /// Speed pairs of every valid record.
    pub fn speed_pairs(&self) -> Vec<SpeedPair> {
        self.records.iter().map(Record::speed_pair).collect()
    }

    /// Average over all valid records, `None` when there are none.
    pub fn overall_average(&self) -> Option<Average> {
        if self.is_empty() {
            return None;
        }
        Some(stats::average(&self.speed_pairs()))
    }

    /// Full statistics over all valid records, `None` when there are none.
    pub fn overall_stats(&self) -> Option<GroupStats> {
        if self.is_empty() {
            return None;
        }
        Some(stats::group_stats(&self.speed_pairs()))
    }

    /// Statistics per bucket of `grouping`, ordered by key.
    pub fn group(&self, grouping: Grouping) -> BTreeMap<String, GroupStats> {
        // ---
        self.buckets(grouping)
            .iter()
            .map(|(key, pairs)| (key.clone(), stats::group_stats(pairs)))
            .collect()
    }

    pub fn by_hour(&self) -> BTreeMap<String, GroupStats> {
        self.group(Grouping::Hour)
    }

    pub fn by_weekday(&self) -> BTreeMap<String, GroupStats> {
        self.group(Grouping::Weekday)
    }
}
