//! Console output
//!
//! Text mode prints the discovery log, the chart location and the summary block
//! on stdout. JSON mode prints only the summary document; the progress lines
//! go to the log instead.

use crate::config::SummaryFormat;
use anyhow::Result;
use bench_report::{input_names, Summary};
use std::path::{Path, PathBuf};

pub struct Console {
    format: SummaryFormat,
}

impl Console {
    pub fn new(format: SummaryFormat) -> Self {
        Self { format }
    }

    pub fn inputs(&self, inputs: &[PathBuf]) {
        let line = format!(
            "Found {} CSV files: {}",
            inputs.len(),
            list_literal(&input_names(inputs))
        );
        match self.format {
            SummaryFormat::Text => println!("{}", line),
            SummaryFormat::Json => log::info!("{}", line),
        }
    }

    pub fn image_saved(&self, path: &Path) {
        let line = format!("Graph saved as '{}'", path.display());
        match self.format {
            SummaryFormat::Text => println!("{}", line),
            SummaryFormat::Json => log::info!("{}", line),
        }
    }

    pub fn summary(&self, summary: &Summary) -> Result<()> {
        match self.format {
            SummaryFormat::Text => print!("{}", summary),
            SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        }
        Ok(())
    }
}

/// `['a.csv', 'b.csv']`
fn list_literal(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}
