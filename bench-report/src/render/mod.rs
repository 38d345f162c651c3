//! Chart layout and rendering
//!
//! Rendering is split in two steps. [`plan_figure`] turns the dataset into a
//! [`FigurePlan`]: the panel grid, titles and per-source point lists, with
//! every display transform already applied. [`render_figure`] then draws that
//! plan into a PNG file. Keeping the plan separate makes the layout testable
//! without touching pixels.

mod chart;
mod font;

use crate::config::{ReportConfig, MAX_DPI};
use crate::dataset::Dataset;
use crate::palette::ColorMap;
use crate::types::{thread_label, BenchKind, Record, ReportError, Result};
use std::path::{Path, PathBuf};

pub use chart::render_figure;

/// X axis description shared by every panel
pub const X_AXIS_LABEL: &str = "Interval (blocks between payments) [log scale]";
/// Y axis description shared by every panel
pub const Y_AXIS_LABEL: &str = "Average Time (ms) [log scale]";

/// Figure width in inches
const FIGURE_WIDTH_IN: u32 = 16;
/// Height of one panel row in inches
const ROW_HEIGHT_IN: u32 = 6;

/// One plotted line: a single source within a panel
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLine {
    pub source: String,
    /// (display interval, milliseconds), ascending by interval
    pub points: Vec<(f64, f64)>,
}

/// One chart panel: a category at a thread count
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub kind: BenchKind,
    pub threads: u32,
    pub title: String,
    pub lines: Vec<PlotLine>,
}

/// The Fast and Slow panels of one thread count
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub threads: u32,
    pub panels: [Panel; 2],
}

/// Complete figure layout, top row first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FigurePlan {
    pub rows: Vec<PanelRow>,
}

impl FigurePlan {
    pub fn num_panels(&self) -> usize {
        self.rows.len() * 2
    }

    pub fn num_lines(&self) -> usize {
        self.panels().map(|p| p.lines.len()).sum()
    }

    /// Panels in drawing order (row by row, Fast before Slow)
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.rows.iter().flat_map(|row| row.panels.iter())
    }
}

/// Pixel geometry and font for the rendered image
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Image width in pixels
    pub width: u32,
    /// Height of one panel row in pixels
    pub row_height: u32,
    /// TrueType font for titles, ticks and legends
    pub font: Option<PathBuf>,
}

impl RenderOptions {
    pub fn from_config(config: &ReportConfig) -> Self {
        let dpi = config.dpi.clamp(1, MAX_DPI);
        Self {
            width: FIGURE_WIDTH_IN * dpi,
            row_height: ROW_HEIGHT_IN * dpi,
            font: config.font.clone(),
        }
    }

    /// Full image size for a plan with `rows` panel rows
    pub fn image_size(&self, rows: usize) -> Result<(u32, u32)> {
        let height = u32::try_from(rows.max(1))
            .ok()
            .and_then(|rows| self.row_height.checked_mul(rows))
            .ok_or_else(|| {
                ReportError::Render(format!(
                    "{} panel rows of {} px exceed the maximum image height",
                    rows, self.row_height
                ))
            })?;
        Ok((self.width, height))
    }
}

/// X position of an interval on the log axis; 0 is drawn at 1
pub fn display_interval(interval: u64) -> f64 {
    if interval == 0 {
        1.0
    } else {
        interval as f64
    }
}

/// Lay out the figure: one row per thread count, a Fast and a Slow panel each
pub fn plan_figure(dataset: &Dataset) -> FigurePlan {
    let sources = dataset.sources();
    let rows = dataset
        .thread_counts()
        .into_iter()
        .map(|threads| {
            let group = dataset.partition(threads);
            let panels = BenchKind::PLOTTED
                .map(|kind| plan_panel(&sources, group.subset(&kind), kind, threads));
            PanelRow { threads, panels }
        })
        .collect();

    FigurePlan { rows }
}

fn plan_panel(sources: &[String], subset: &[&Record], kind: BenchKind, threads: u32) -> Panel {
    let mut lines = Vec::new();
    for source in sources {
        let mut rows: Vec<&Record> = subset
            .iter()
            .copied()
            .filter(|r| &r.source == source)
            .collect();
        if rows.is_empty() {
            log::debug!("No {} rows for {} at {}", kind, source, thread_label(threads));
            continue;
        }
        rows.sort_by_key(|r| r.interval);
        lines.push(PlotLine {
            source: source.clone(),
            points: rows
                .iter()
                .map(|r| (display_interval(r.interval), r.avg_time_ms()))
                .collect(),
        });
    }

    Panel {
        title: format!("{} Rescan Performance ({})", kind, thread_label(threads)),
        kind,
        threads,
        lines,
    }
}

/// Plan and draw the figure in one go
pub fn render_dataset(
    dataset: &Dataset,
    colors: &ColorMap,
    options: &RenderOptions,
    output: &Path,
) -> Result<FigurePlan> {
    let plan = plan_figure(dataset);
    render_figure(&plan, colors, options, output)?;
    Ok(plan)
}
