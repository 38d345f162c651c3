//! Configuration loading and parsing
//!
//! Every field is optional; an empty file (or no file at all) gives the
//! built-in behavior.

use anyhow::{Context, Result};
use bench_report::config::{DEFAULT_DPI, DEFAULT_IMAGE, DEFAULT_PATTERN, MAX_DPI};
use bench_report::ReportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_image")]
    pub image: PathBuf,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Open the chart in the system image viewer after writing it
    #[serde(default = "default_true")]
    pub show: bool,
    pub font: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SummaryConfig {
    #[serde(default)]
    pub format: SummaryFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
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

fn default_true() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            pattern: default_pattern(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            dpi: default_dpi(),
            show: true,
            font: None,
        }
    }
}

impl AppConfig {
    /// Library configuration for this run
    pub fn report_config(&self) -> ReportConfig {
        let config = ReportConfig::new()
            .with_input_dir(&self.input.dir)
            .with_pattern(&self.input.pattern)
            .with_output_image(&self.output.image)
            .with_dpi(self.output.dpi);
        match &self.output.font {
            Some(font) => config.with_font(font),
            None => config,
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if !(1..=MAX_DPI).contains(&config.output.dpi) {
        anyhow::bail!(
            "Invalid config file {:?}: output.dpi must be between 1 and {}",
            path,
            MAX_DPI
        );
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            dir = "results"

            [output]
            image = "compare.png"
            dpi = 150
            show = false

            [summary]
            format = "json"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.dir, PathBuf::from("results"));
        assert_eq!(config.input.pattern, "*.csv");
        assert_eq!(config.output.dpi, 150);
        assert!(!config.output.show);
        assert_eq!(config.summary.format, SummaryFormat::Json);

        let report = config.report_config();
        assert_eq!(report.output_path(), PathBuf::from("results/compare.png"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.output.show);
        assert_eq!(config.summary.format, SummaryFormat::Text);
        assert_eq!(config.report_config(), ReportConfig::default());
    }

    #[test]
    fn test_load_config_rejects_out_of_range_dpi() {
        for dpi in [0, MAX_DPI + 1, u32::MAX] {
            let mut file = NamedTempFile::new().unwrap();
            writeln!(file, "[output]\ndpi = {}", dpi).unwrap();

            let err = load_config(file.path()).unwrap_err();
            assert!(err.to_string().contains("dpi"));
        }
    }
}
