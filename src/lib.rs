//! Statistics from plain-text speed-test logs.
//!
//! A log is a sequence of record blocks separated by a line of 26 dashes.
//! Each block carries a `Speed test start:` timestamp, `Download:` and
//! `Upload:` speeds in Mbps, and usually a `Server:` line. The pipeline
//! runs in a single pass when a [`SpeedLog`] is built:
//! - split the content into blocks (`splitter`)
//! - extract fields from each block (`parser`, `datetime`)
//! - drop records without two positive speeds and bucket the rest by local
//!   hour and ISO weekday (`speedlog`)
//!
//! Statistics (`stats`) are computed on demand from those buckets.

pub mod datetime;
pub mod error;
pub mod models;
pub mod parser;
pub mod speedlog;
pub mod splitter;
pub mod stats;

pub use datetime::REFERENCE_TIMEZONE;
pub use error::{MalformedBlock, ParseError, SpeedLogError};
pub use models::{Average, Direction, DirectionMinMax, GroupStats, MinMax, Record, SpeedPair};
pub use speedlog::{Grouping, SpeedLog};
pub use splitter::RECORD_DELIMITER;
