//! Report generator configuration
//!
//! Defaults reproduce the fixed behavior of the tool: read `*.csv` from the
//! working directory and write `benchmark_comparison.png` next to them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default glob for input discovery
pub const DEFAULT_PATTERN: &str = "*.csv";
/// Default chart file name
pub const DEFAULT_IMAGE: &str = "benchmark_comparison.png";
/// Default raster resolution (pixels per figure inch)
pub const DEFAULT_DPI: u32 = 100;
/// Highest accepted raster resolution
pub const MAX_DPI: u32 = 1200;

/// Configuration for the report generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory scanned for input files
    #[serde(default = "default_dir")]
    pub input_dir: PathBuf,

    /// File name glob applied inside `input_dir`
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Output image path; relative paths are resolved against `input_dir`
    #[serde(default = "default_image")]
    pub output_image: PathBuf,

    /// Pixels per figure inch (the figure is 16 x 6-per-row inches)
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Optional TrueType font used for chart text
    #[serde(default)]
    pub font: Option<PathBuf>,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_image() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE)
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_dir: default_dir(),
            pattern: default_pattern(),
            output_image: default_image(),
            dpi: default_dpi(),
            font: None,
        }
    }
}

impl ReportConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the input directory
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Builder method: set the input glob
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Builder method: set the output image path
    pub fn with_output_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_image = path.into();
        self
    }

    /// Builder method: set the raster resolution
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Builder method: set the chart font
    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.font = Some(path.into());
        self
    }

    /// Where the chart will be written
    pub fn output_path(&self) -> PathBuf {
        resolve_against(&self.input_dir, &self.output_image)
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base == Path::new(".") {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::new();
        assert_eq!(config.pattern, "*.csv");
        assert_eq!(config.dpi, 100);
        assert_eq!(config.output_path(), PathBuf::from("benchmark_comparison.png"));
    }

    #[test]
    fn test_builder() {
        let config = ReportConfig::new()
            .with_input_dir("/data/bench")
            .with_pattern("run-*.csv")
            .with_output_image("out/chart.png")
            .with_dpi(300)
            .with_font("/fonts/Sans.ttf");

        assert_eq!(config.pattern, "run-*.csv");
        assert_eq!(config.dpi, 300);
        assert_eq!(config.font, Some(PathBuf::from("/fonts/Sans.ttf")));
        assert_eq!(
            config.output_path(),
            PathBuf::from("/data/bench/out/chart.png")
        );
    }

    #[test]
    fn test_absolute_output_is_kept() {
        let config = ReportConfig::new()
            .with_input_dir("/data/bench")
            .with_output_image("/tmp/chart.png");
        assert_eq!(config.output_path(), PathBuf::from("/tmp/chart.png"));
    }
}
