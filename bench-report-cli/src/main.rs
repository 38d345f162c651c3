//! Benchmark Report CLI Application
//!
//! This is the command-line interface for the benchmark report generator.
//! It uses the bench-report library and adds:
//! - TOML configuration and command-line overrides
//! - Console output (discovery log, summary as text or JSON)
//! - Opening the chart in the system image viewer

use anyhow::{Context, Result};
use bench_report::config::MAX_DPI;
use bench_report::{ReportError, ReportGenerator};
use clap::Parser;
use std::path::PathBuf;

mod config;
mod report;
mod viewer;

use config::{AppConfig, SummaryFormat};
use report::Console;

/// Benchmark Report - Compare benchmark CSV files and plot the results
#[derive(Parser, Debug)]
#[command(name = "bench-report")]
#[command(about = "Compare benchmark CSV files and plot the results", long_about = None)]
#[command(version)]
struct Args {
    /// Directory containing the benchmark CSV files (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Output image (default: benchmark_comparison.png in the input directory)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Image resolution in pixels per figure inch
    #[arg(long, value_name = "DPI", value_parser = clap::value_parser!(u32).range(1..=MAX_DPI as i64))]
    dpi: Option<u32>,

    /// Do not open the chart in an image viewer
    #[arg(long)]
    no_show: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::debug!("Benchmark Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using report library v{}", bench_report::VERSION);

    let app = resolve_config(&args)?;
    let console = Console::new(app.summary.format);
    let generator = ReportGenerator::new(app.report_config());

    let inputs = match generator.discover() {
        Ok(inputs) => inputs,
        Err(e @ ReportError::NoInput { .. }) => {
            println!("{}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to discover input files"),
    };
    console.inputs(&inputs);

    let dataset = generator
        .load(&inputs)
        .context("Failed to load benchmark results")?;

    generator
        .render(&dataset)
        .context("Failed to render comparison chart")?;
    let image = generator.config().output_path();
    console.image_saved(&image);

    let summary = generator.summarize(&dataset);
    console.summary(&summary)?;

    if app.output.show {
        viewer::show(&image);
    }

    Ok(())
}

/// Configuration file (if any) with command-line overrides applied
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut app = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(dir) = &args.dir {
        app.input.dir = dir.clone();
    }
    if let Some(output) = &args.output {
        app.output.image = output.clone();
    }
    if let Some(dpi) = args.dpi {
        app.output.dpi = dpi;
    }
    if args.no_show {
        app.output.show = false;
    }
    if args.json {
        app.summary.format = SummaryFormat::Json;
    }

    Ok(app)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
