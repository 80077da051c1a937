//! Descriptive statistics over lists of speed pairs.
//!
//! The same routines serve the overall figures and every hour or weekday
//! bucket. Nothing is cached: each call recomputes from its input slice.
//!
//! All functions here require a non-empty input. Buckets only come into
//! existence with their first measurement, so the pipeline never violates
//! this; calling them on an empty slice is a bug and panics.

use crate::models::{Average, Direction, DirectionMinMax, GroupStats, MinMax, SpeedPair};

// ---

/// Format a speed with three decimals, rounding halves away from zero.
pub fn format_speed(speed: f64) -> String {
    let rounded = (speed * 1000.0).round() / 1000.0;
    format!("{:.3}", rounded)
}

/// Arithmetic mean of one direction, unformatted.
///
/// # Panics
///
/// Panics if `pairs` is empty.
pub fn mean(direction: Direction, pairs: &[SpeedPair]) -> f64 {
    // ---
    assert!(!pairs.is_empty(), "mean of an empty measurement set");
    let sum: f64 = pairs.iter().map(|p| p.get(direction)).sum();
    sum / pairs.len() as f64
}

/// Formatted mean download and upload speed.
///
/// # Panics
///
/// Panics if `pairs` is empty.
pub fn average(pairs: &[SpeedPair]) -> Average {
    Average {
        down: format_speed(mean(Direction::Download, pairs)),
        up: format_speed(mean(Direction::Upload, pairs)),
    }
}

/// Smallest and largest raw value of one direction.
///
/// # Panics
///
/// Panics if `pairs` is empty.
pub fn min_max(direction: Direction, pairs: &[SpeedPair]) -> MinMax {
    // ---
    assert!(!pairs.is_empty(), "min/max of an empty measurement set");
    let mut values = pairs.iter().map(|p| p.get(direction));
    let first = values.next().unwrap_or_default();

    values.fold(MinMax { min: first, max: first }, |acc, v| MinMax {
        min: acc.min.min(v),
        max: acc.max.max(v),
    })
}

/// Count, average and min/max for both directions.
///
/// # Panics
///
/// Panics if `pairs` is empty.
pub fn group_stats(pairs: &[SpeedPair]) -> GroupStats {
    // ---
    GroupStats {
        count: pairs.len(),
        average: average(pairs),
        min_max: DirectionMinMax {
            down: min_max(Direction::Download, pairs),
            up: min_max(Direction::Upload, pairs),
        },
    }
}
