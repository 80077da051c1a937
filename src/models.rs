//! Data models for parsed speed-test measurements and their statistics.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

// ---

/// One speed-test measurement extracted from a record block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    // ---
    /// Start of the test, localized to the reference zone.
    pub timestamp: DateTime<Tz>,
    /// `timestamp` as `YYYY-MM-DD HH:MM:SS (ABBR)`.
    pub display_datetime: String,
    /// Mbps; `0.0` when the block had no usable `Download:` line.
    pub download_speed: f64,
    /// Mbps; `0.0` when the block had no usable `Upload:` line.
    pub upload_speed: f64,
    pub server: Option<String>,
}

/// Download and upload speed of a single measurement, in Mbps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedPair {
    pub down: f64,
    pub up: f64,
}

/// Which half of a [`SpeedPair`] a statistic is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Download,
    Upload,
}

/// Mean speeds, each formatted with exactly three decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Average {
    pub down: String,
    pub up: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionMinMax {
    pub down: MinMax,
    pub up: MinMax,
}

/// Count, average and extremes over one group of measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub count: usize,
    pub average: Average,
    pub min_max: DirectionMinMax,
}

impl Record {
    // ---
    pub fn speed_pair(&self) -> SpeedPair {
        SpeedPair {
            down: self.download_speed,
            up: self.upload_speed,
        }
    }

    /// Only records with both speeds strictly positive take part in aggregation.
    pub fn is_valid(&self) -> bool {
        self.download_speed > 0.0 && self.upload_speed > 0.0
    }
}

impl SpeedPair {
    pub fn get(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Download => self.down,
            Direction::Upload => self.up,
        }
    }
}
