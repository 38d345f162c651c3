//! Benchmark Report Library
//!
//! Aggregates benchmark CSV files (one per benchmark run) into a comparison
//! chart and a per-run summary.
//!
//! # Pipeline
//!
//! - Discover `*.csv` files in a directory, sorted by name
//! - Load each file into typed records; the file stem becomes the series label
//! - Group rows by thread count and by `Fast`/`Slow` category
//! - Draw one row of Fast/Slow panels per thread count, log/log axes
//! - Summarize mean times and the Slow/Fast ratio per source and thread count
//!
//! Printing, configuration files and opening the chart in a viewer live in the
//! application layer (bench-report-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use bench_report::{ReportConfig, ReportGenerator};
//!
//! let config = ReportConfig::new()
//!     .with_input_dir("results")
//!     .with_output_image("comparison.png");
//!
//! let report = ReportGenerator::new(config).run().unwrap();
//! println!("Chart written to {:?}", report.image);
//! print!("{}", report.summary);
//! ```

// Public modules
pub mod config;
pub mod dataset;
pub mod discovery;
pub mod generator;
pub mod loader;
pub mod palette;
pub mod render;
pub mod summary;
pub mod types;

// Re-export main types for convenience
pub use config::ReportConfig;
pub use dataset::{Dataset, DatasetStats, ThreadGroup};
pub use generator::{input_names, Report, ReportGenerator};
pub use palette::ColorMap;
pub use render::{FigurePlan, Panel, PanelRow, PlotLine, RenderOptions};
pub use summary::{SourceSummary, Summary, ThreadSummary};
pub use types::{BenchKind, Record, ReportError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
