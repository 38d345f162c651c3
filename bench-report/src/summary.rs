//! Summary statistics
//!
//! Per source and thread count: mean Fast and Slow time and their ratio. The
//! means are taken over the raw measurements; chart-only transforms such as the
//! interval remap never reach this module.

use crate::dataset::Dataset;
use crate::types::{thread_label, BenchKind, Record};
use serde::Serialize;
use std::fmt;

/// Means for one thread count of one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadSummary {
    pub threads: u32,
    /// Mean Fast time in milliseconds
    pub fast_ms: f64,
    /// Mean Slow time in milliseconds
    pub slow_ms: f64,
    /// Mean Slow time over mean Fast time
    pub speedup: f64,
}

/// All thread counts of one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    pub source: String,
    /// Only thread counts with both Fast and Slow rows
    pub threads: Vec<ThreadSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub sources: Vec<SourceSummary>,
}

impl Summary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let thread_counts = dataset.thread_counts();
        let sources = dataset
            .sources()
            .into_iter()
            .map(|source| {
                let threads = thread_counts
                    .iter()
                    .filter_map(|&threads| summarize(dataset, &source, threads))
                    .collect();
                SourceSummary { source, threads }
            })
            .collect();

        Self { sources }
    }
}

fn summarize(dataset: &Dataset, source: &str, threads: u32) -> Option<ThreadSummary> {
    let group = dataset.partition(threads);
    let fast_us = mean_time_us(group.fast.iter().copied().filter(|r| r.source == source))?;
    let slow_us = mean_time_us(group.slow.iter().copied().filter(|r| r.source == source))?;

    Some(ThreadSummary {
        threads,
        fast_ms: fast_us / 1000.0,
        slow_ms: slow_us / 1000.0,
        speedup: slow_us / fast_us,
    })
}

fn mean_time_us<'a>(rows: impl Iterator<Item = &'a Record>) -> Option<f64> {
    let (sum, count) = rows.fold((0.0, 0usize), |(sum, count), r| {
        (sum + r.avg_time_us, count + 1)
    });
    (count > 0).then(|| sum / count as f64)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "=== Summary Statistics ===")?;
        for source in &self.sources {
            writeln!(f)?;
            writeln!(f, "Source: {}", source.source)?;
            for entry in &source.threads {
                writeln!(f, "  {}:", thread_label(entry.threads))?;
                writeln!(f, "    {} - Avg time: {:.2} ms", BenchKind::Fast, entry.fast_ms)?;
                writeln!(f, "    {} - Avg time: {:.2} ms", BenchKind::Slow, entry.slow_ms)?;
                writeln!(f, "    Speedup: {}x", format_ratio(entry.speedup))?;
            }
        }
        Ok(())
    }
}

/// Two decimals; a 0/0 ratio prints as `nan` and a zero Fast mean as `inf`
fn format_ratio(ratio: f64) -> String {
    if ratio.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", ratio)
    }
}
