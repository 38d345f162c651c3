//! Benchmark CSV loader
//!
//! Reads one input file into typed [`Record`]s. The header is validated before
//! any row is parsed, so a missing column fails fast with a schema error
//! instead of surfacing later while plotting.

use crate::dataset::Dataset;
use crate::types::{
    BenchKind, Record, ReportError, Result, COLUMN_AVG_TIME, COLUMN_INTERVAL, COLUMN_THREADS,
    COLUMN_TYPE, DEFAULT_THREADS, REQUIRED_COLUMNS,
};
use std::collections::BTreeMap;
use std::path::Path;

/// Series label for an input file: its file name without the extension
pub fn source_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Column positions resolved from a file header
struct ColumnLayout {
    kind: usize,
    interval: usize,
    avg_time: usize,
    threads: Option<usize>,
    extra: Vec<(usize, String)>,
}

impl ColumnLayout {
    fn from_headers(path: &Path, headers: &csv::StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        for column in REQUIRED_COLUMNS {
            if position(column).is_none() {
                return Err(ReportError::Schema {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        let known = [COLUMN_TYPE, COLUMN_INTERVAL, COLUMN_AVG_TIME, COLUMN_THREADS];
        let extra = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !known.contains(h))
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        Ok(Self {
            kind: position(COLUMN_TYPE).unwrap_or_default(),
            interval: position(COLUMN_INTERVAL).unwrap_or_default(),
            avg_time: position(COLUMN_AVG_TIME).unwrap_or_default(),
            threads: position(COLUMN_THREADS),
            extra,
        })
    }
}

/// Load a single benchmark file
pub fn load_file(path: &Path) -> Result<Vec<Record>> {
    log::info!("Loading benchmark file: {:?}", path);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(path, &headers)?;
    if layout.threads.is_none() {
        log::debug!(
            "{:?} has no {} column, assuming {}",
            path,
            COLUMN_THREADS,
            DEFAULT_THREADS
        );
    }

    let source = source_label(path);
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let invalid = |column: &str, value: &str| ReportError::InvalidValue {
            path: path.to_path_buf(),
            line,
            column: column.to_string(),
            value: value.to_string(),
        };

        let raw_interval = cell(layout.interval);
        let interval =
            parse_count(raw_interval).ok_or_else(|| invalid(COLUMN_INTERVAL, raw_interval))?;

        let raw_time = cell(layout.avg_time);
        let avg_time_us = raw_time
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| invalid(COLUMN_AVG_TIME, raw_time))?;

        let threads = match layout.threads.map(cell) {
            None => DEFAULT_THREADS,
            Some(raw) if raw.trim().is_empty() => DEFAULT_THREADS,
            Some(raw) => parse_count(raw)
                .and_then(|v| u32::try_from(v).ok())
                .filter(|v| *v > 0)
                .ok_or_else(|| invalid(COLUMN_THREADS, raw))?,
        };

        let extra: BTreeMap<String, String> = layout
            .extra
            .iter()
            .map(|(idx, name)| (name.clone(), cell(*idx).to_string()))
            .collect();

        records.push(Record {
            kind: BenchKind::parse(cell(layout.kind)),
            interval,
            avg_time_us,
            threads,
            source: source.clone(),
            extra,
        });
    }

    log::debug!("Parsed {} rows from {:?}", records.len(), path);
    Ok(records)
}

/// Load every file, in order, into one dataset
pub fn load_dataset(paths: &[impl AsRef<Path>]) -> Result<Dataset> {
    let mut dataset = Dataset::new();
    for path in paths {
        let records = load_file(path.as_ref())?;
        dataset.extend(records);
    }
    Ok(dataset)
}

/// Non-negative integer cell; integral floats such as `10.0` are accepted too
fn parse_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}
