//! Unified benchmark dataset
//!
//! Combines the records of every input file into one table and answers the
//! grouping queries used by the chart and the summary.

use crate::types::{BenchKind, Record};
use std::collections::BTreeSet;

/// All records of a run, in load order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

/// The plotted subsets of one thread count
#[derive(Debug, Clone, Default)]
pub struct ThreadGroup<'a> {
    pub threads: u32,
    pub fast: Vec<&'a Record>,
    pub slow: Vec<&'a Record>,
}

impl<'a> ThreadGroup<'a> {
    /// Rows of one plotted category
    pub fn subset(&self, kind: &BenchKind) -> &[&'a Record] {
        match kind {
            BenchKind::Fast => &self.fast,
            BenchKind::Slow => &self.slow,
            BenchKind::Other(_) => &[],
        }
    }
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the records of one file
    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct sources in order of first appearance
    pub fn sources(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.source.as_str()))
            .map(|r| r.source.clone())
            .collect()
    }

    /// Distinct thread counts, ascending
    pub fn thread_counts(&self) -> Vec<u32> {
        let counts: BTreeSet<u32> = self.records.iter().map(|r| r.threads).collect();
        counts.into_iter().collect()
    }

    /// Distinct intervals, ascending
    pub fn intervals(&self) -> Vec<u64> {
        let intervals: BTreeSet<u64> = self.records.iter().map(|r| r.interval).collect();
        intervals.into_iter().collect()
    }

    /// Split the rows of one thread count into the Fast and Slow subsets
    ///
    /// Rows with any other `Type` land in neither subset.
    pub fn partition(&self, threads: u32) -> ThreadGroup<'_> {
        let mut group = ThreadGroup {
            threads,
            ..Default::default()
        };
        for record in self.records.iter().filter(|r| r.threads == threads) {
            match record.kind {
                BenchKind::Fast => group.fast.push(record),
                BenchKind::Slow => group.slow.push(record),
                BenchKind::Other(_) => {}
            }
        }
        group
    }

    /// One series: rows of (`source`, `kind`, `threads`), sorted by interval
    pub fn series(&self, source: &str, kind: &BenchKind, threads: u32) -> Vec<&Record> {
        let mut rows: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| r.source == source && &r.kind == kind && r.threads == threads)
            .collect();
        rows.sort_by_key(|r| r.interval);
        rows
    }

    /// Rows whose `Type` is neither Fast nor Slow
    pub fn excluded(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| !r.kind.is_plotted())
    }

    /// Get dataset statistics
    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            num_records: self.records.len(),
            num_sources: self.sources().len(),
            num_thread_counts: self.thread_counts().len(),
            num_intervals: self.intervals().len(),
            num_excluded: self.excluded().count(),
        }
    }
}

/// Dataset statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStats {
    /// Total number of rows loaded
    pub num_records: usize,
    /// Number of distinct sources (input files with rows)
    pub num_sources: usize,
    /// Number of distinct thread counts (panel rows)
    pub num_thread_counts: usize,
    /// Number of distinct intervals
    pub num_intervals: usize,
    /// Rows ignored because their `Type` is not plotted
    pub num_excluded: usize,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::BTreeMap;

    pub(crate) fn record(source: &str, kind: &str, interval: u64, us: f64, threads: u32) -> Record {
        Record {
            kind: BenchKind::parse(kind),
            interval,
            avg_time_us: us,
            threads,
            source: source.to_string(),
            extra: BTreeMap::new(),
        }
    }

    fn sample() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.extend(vec![
            record("def456", "Fast", 100, 300.0, 4),
            record("def456", "Fast", 10, 200.0, 4),
            record("def456", "Slow", 10, 900.0, 1),
            record("abc123", "Fast", 0, 100.0, 1),
            record("abc123", "Medium", 10, 50.0, 1),
        ]);
        dataset
    }

    #[test]
    fn test_distinct_values() {
        let dataset = sample();
        assert_eq!(dataset.sources(), vec!["def456", "abc123"]);
        assert_eq!(dataset.thread_counts(), vec![1, 4]);
        assert_eq!(dataset.intervals(), vec![0, 10, 100]);
    }

    #[test]
    fn test_partition_drops_unknown_types() {
        let dataset = sample();
        let group = dataset.partition(1);
        assert_eq!(group.fast.len(), 1);
        assert_eq!(group.slow.len(), 1);
        assert!(group.subset(&BenchKind::Other("Medium".into())).is_empty());

        let group = dataset.partition(4);
        assert_eq!(group.fast.len(), 2);
        assert!(group.slow.is_empty());
    }

    #[test]
    fn test_series_sorted_by_interval() {
        let dataset = sample();
        let series = dataset.series("def456", &BenchKind::Fast, 4);
        let intervals: Vec<u64> = series.iter().map(|r| r.interval).collect();
        assert_eq!(intervals, vec![10, 100]);
        assert!(dataset.series("abc123", &BenchKind::Slow, 4).is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(stats.num_records, 5);
        assert_eq!(stats.num_sources, 2);
        assert_eq!(stats.num_thread_counts, 2);
        assert_eq!(stats.num_intervals, 3);
        assert_eq!(stats.num_excluded, 1);
    }
}
