//! Main report generator API
//!
//! [`ReportGenerator`] runs the whole pipeline: discover input files, load them
//! into one dataset, lay out and draw the chart, and compute the summary. Each
//! stage is also exposed on its own so callers can report progress between
//! them.

use crate::config::ReportConfig;
use crate::dataset::{Dataset, DatasetStats};
use crate::discovery::discover_inputs;
use crate::loader::load_dataset;
use crate::palette::ColorMap;
use crate::render::{render_dataset, FigurePlan, RenderOptions};
use crate::summary::Summary;
use crate::types::{thread_label, ReportError, Result};
use std::path::{Path, PathBuf};

/// The main generator struct - entry point for producing a report
pub struct ReportGenerator {
    config: ReportConfig,
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct Report {
    /// Input files, in load order
    pub inputs: Vec<PathBuf>,
    pub stats: DatasetStats,
    /// Layout of the chart that was written
    pub plan: FigurePlan,
    pub summary: Summary,
    /// Where the chart was written
    pub image: PathBuf,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Find the input files
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        discover_inputs(&self.config.input_dir, &self.config.pattern)
    }

    /// Load and normalize the input files into one dataset
    pub fn load(&self, inputs: &[PathBuf]) -> Result<Dataset> {
        let dataset = load_dataset(inputs)?;
        if dataset.is_empty() {
            return Err(ReportError::EmptyDataset {
                files: inputs.len(),
            });
        }

        let stats = dataset.stats();
        log::info!(
            "Loaded {} rows from {} sources ({} thread counts, {} intervals)",
            stats.num_records,
            stats.num_sources,
            stats.num_thread_counts,
            stats.num_intervals
        );
        if stats.num_excluded > 0 {
            log::warn!(
                "Ignoring {} rows whose Type is neither Fast nor Slow",
                stats.num_excluded
            );
        }
        Ok(dataset)
    }

    /// Draw the comparison chart and return its layout
    pub fn render(&self, dataset: &Dataset) -> Result<FigurePlan> {
        let colors = ColorMap::for_sources(&dataset.sources());
        let options = RenderOptions::from_config(&self.config);
        let output = self.config.output_path();

        let plan = render_dataset(dataset, &colors, &options, &output)?;
        for row in &plan.rows {
            log::debug!(
                "{}: {} Fast lines, {} Slow lines",
                thread_label(row.threads),
                row.panels[0].lines.len(),
                row.panels[1].lines.len()
            );
        }
        Ok(plan)
    }

    /// Compute the per-source summary
    pub fn summarize(&self, dataset: &Dataset) -> Summary {
        Summary::from_dataset(dataset)
    }

    /// Run every stage in order
    pub fn run(&self) -> Result<Report> {
        let inputs = self.discover()?;
        let dataset = self.load(&inputs)?;
        let plan = self.render(&dataset)?;
        let summary = self.summarize(&dataset);

        Ok(Report {
            stats: dataset.stats(),
            image: self.config.output_path(),
            inputs,
            plan,
            summary,
        })
    }
}

/// File names of `inputs`, for display
pub fn input_names(inputs: &[PathBuf]) -> Vec<String> {
    inputs
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect()
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

impl Report {
    pub fn image_path(&self) -> &Path {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir) -> ReportConfig {
        ReportConfig::new().with_input_dir(dir.path()).with_dpi(50)
    }

    const HEADER: &str = "Type,Interval,Avg Time (us)";

    #[test]
    fn test_run_two_sources() {
        let dir = TempDir::new().unwrap();
        for name in ["abc123.csv", "def456.csv"] {
            fs::write(
                dir.path().join(name),
                format!("{HEADER}\nFast,10,500\nSlow,10,1500\n"),
            )
            .unwrap();
        }

        let report = ReportGenerator::new(config_for(&dir)).run().unwrap();

        assert_eq!(input_names(&report.inputs), vec!["abc123.csv", "def456.csv"]);
        assert_eq!(report.stats.num_records, 4);
        assert_eq!(report.plan.rows.len(), 1);
        assert_eq!(report.plan.num_lines(), 4);
        assert!(report.image_path().ends_with("benchmark_comparison.png"));
        assert!(report.image_path().is_file());
        for source in &report.summary.sources {
            assert_eq!(source.threads[0].speedup, 3.0);
        }
    }

    #[test]
    fn test_summary_is_stable_across_runs() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("abc123.csv"),
            "Type,Interval,Avg Time (us),Threads\nFast,1,120,1\nSlow,1,360,2\nFast,1,100,2\nSlow,0,333,1\n",
        )
        .unwrap();

        let generator = ReportGenerator::new(config_for(&dir));
        let first = generator.run().unwrap();
        let second = generator.run().unwrap();
        assert_eq!(first.summary.to_string(), second.summary.to_string());
        assert_eq!(first.plan, second.plan);
    }

    #[test]
    fn test_no_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::new(config_for(&dir));

        let err = generator.run().unwrap_err();
        assert!(matches!(err, ReportError::NoInput { .. }));
        assert!(!generator.config().output_path().exists());
    }

    #[test]
    fn test_schema_error_writes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("abc123.csv"), format!("{HEADER}\nFast,10,500\n")).unwrap();
        fs::write(dir.path().join("def456.csv"), "Type,Avg Time (us)\nFast,500\n").unwrap();
        let generator = ReportGenerator::new(config_for(&dir));

        let err = generator.run().unwrap_err();
        assert!(matches!(err, ReportError::Schema { .. }));
        assert!(!generator.config().output_path().exists());
    }

    #[test]
    fn test_header_only_files_are_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("abc123.csv"), format!("{HEADER}\n")).unwrap();

        let err = ReportGenerator::new(config_for(&dir)).run().unwrap_err();
        assert!(matches!(err, ReportError::EmptyDataset { files: 1 }));
    }
}
