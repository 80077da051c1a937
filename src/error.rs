//! Error types for the speed-log pipeline.
//!
//! File-level failures abort construction and surface as [`SpeedLogError`].
//! Block-level failures are [`ParseError`]s; the pipeline records them as
//! [`MalformedBlock`]s and moves on to the next block.

use std::{io, path::PathBuf};

use thiserror::Error;

// ---

/// Fatal errors raised while building a [`crate::SpeedLog`].
#[derive(Debug, Error)]
pub enum SpeedLogError {
    /// The input log could not be opened or read.
    #[error("Log file not accessible: {}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reasons a single record block could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("block has no 'Speed test start:' line")]
    MissingTimestamp,

    #[error("unrecognised date/time '{0}'")]
    UnparseableTimestamp(String),
}

/// A block that was skipped because it failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedBlock {
    /// Zero-based position among the non-blank blocks of the input.
    pub index: usize,
    pub error: ParseError,
}
