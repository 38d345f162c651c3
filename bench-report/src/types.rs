//! Core types for the benchmark report library
//!
//! This module defines the typed benchmark record produced by the loader and the
//! error type shared by every stage of the pipeline.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Column holding the benchmark category
pub const COLUMN_TYPE: &str = "Type";
/// Column holding the x-axis coordinate
pub const COLUMN_INTERVAL: &str = "Interval";
/// Column holding the measurement in microseconds
pub const COLUMN_AVG_TIME: &str = "Avg Time (us)";
/// Optional column holding the thread count
pub const COLUMN_THREADS: &str = "Threads";

/// Columns every input file must carry
pub const REQUIRED_COLUMNS: [&str; 3] = [COLUMN_TYPE, COLUMN_INTERVAL, COLUMN_AVG_TIME];

/// Thread count assumed for files written before the `Threads` column existed
pub const DEFAULT_THREADS: u32 = 1;

/// Errors that can occur while generating a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("No input files found matching {pattern:?} in {dir:?}")]
    NoInput { dir: PathBuf, pattern: String },

    #[error("Invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("{path:?} is missing required column {column:?}")]
    Schema { path: PathBuf, column: String },

    #[error("{path:?} line {line}: invalid {column:?} value {value:?}")]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("No benchmark rows found in {files} input files")]
    EmptyDataset { files: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Benchmark category of a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum BenchKind {
    Fast,
    Slow,
    /// Any other category; kept on the record but never plotted or summarized
    Other(String),
}

impl BenchKind {
    /// The two categories that get a panel each, in panel order
    pub const PLOTTED: [BenchKind; 2] = [BenchKind::Fast, BenchKind::Slow];

    /// Parse a raw `Type` cell (exact match, no case folding)
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Fast" => BenchKind::Fast,
            "Slow" => BenchKind::Slow,
            other => BenchKind::Other(other.to_string()),
        }
    }

    /// True for `Fast` and `Slow`
    pub fn is_plotted(&self) -> bool {
        !matches!(self, BenchKind::Other(_))
    }
}

impl fmt::Display for BenchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchKind::Fast => write!(f, "Fast"),
            BenchKind::Slow => write!(f, "Slow"),
            BenchKind::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// One row of benchmark data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Benchmark category (`Type` column)
    pub kind: BenchKind,
    /// X-axis coordinate (`Interval` column)
    pub interval: u64,
    /// Measurement in microseconds (`Avg Time (us)` column)
    pub avg_time_us: f64,
    /// Thread count (`Threads` column, 1 when absent)
    pub threads: u32,
    /// Label derived from the input file name
    pub source: String,
    /// Every other column of the input row, by header name
    pub extra: BTreeMap<String, String>,
}

impl Record {
    /// Measurement converted to milliseconds
    pub fn avg_time_ms(&self) -> f64 {
        self.avg_time_us / 1000.0
    }
}

/// "1 thread", "4 threads"
pub fn thread_label(threads: u32) -> String {
    format!("{} thread{}", threads, if threads != 1 { "s" } else { "" })
}
