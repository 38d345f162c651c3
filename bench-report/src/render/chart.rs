//! Plotters drawing for a [`FigurePlan`]

use super::font::{self, TextSafeBackend};
use super::{FigurePlan, Panel, RenderOptions, X_AXIS_LABEL, Y_AXIS_LABEL};
use crate::palette::ColorMap;
use crate::types::{ReportError, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::ops::Range;
use std::path::Path;

type DrawResult<T, DB> =
    std::result::Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Draw the figure and write it to `output` as PNG
///
/// The image is drawn into a temporary file in the output directory and only
/// moved into place once every panel has been drawn, so a failed run never
/// leaves a partial chart behind.
pub fn render_figure(
    plan: &FigurePlan,
    colors: &ColorMap,
    options: &RenderOptions,
    output: &Path,
) -> Result<()> {
    if plan.rows.is_empty() {
        return Err(ReportError::Render("figure has no panels".to_string()));
    }

    let size = options.image_size(plan.rows.len())?;

    if !font::register_chart_font(options.font.as_deref()) {
        log::warn!("No usable TrueType font found, chart text will be omitted");
    }

    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staging = tempfile::Builder::new()
        .prefix(".bench-report-")
        .suffix(".png")
        .tempfile_in(dir)?;

    log::debug!(
        "Rendering {} panels at {}x{} px",
        plan.num_panels(),
        size.0,
        size.1
    );

    {
        let backend = TextSafeBackend::new(BitMapBackend::new(staging.path(), size));
        let root = backend.into_drawing_area();
        draw_figure(&root, plan, colors).map_err(render_error)?;
        root.present().map_err(render_error)?;
    }

    staging
        .persist(output)
        .map_err(|e| ReportError::Io(e.error))?;
    log::info!("Chart written to {:?}", output);
    Ok(())
}

fn render_error(e: impl std::fmt::Display) -> ReportError {
    ReportError::Render(e.to_string())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plan: &FigurePlan,
    colors: &ColorMap,
) -> DrawResult<(), DB> {
    root.fill(&WHITE)?;

    let cells = root.split_evenly((plan.rows.len(), 2));
    for (area, panel) in cells.iter().zip(plan.panels()) {
        draw_panel(area, panel, colors)?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    colors: &ColorMap,
) -> DrawResult<(), DB> {
    let x_range = log_range(panel.lines.iter().flat_map(|l| l.points.iter().map(|p| p.0)));
    let y_range = log_range(panel.lines.iter().flat_map(|l| l.points.iter().map(|p| p.1)));
    let y_floor = y_range.start;

    let mut chart = ChartBuilder::on(area)
        .caption(
            &panel.title,
            FontDesc::new(FontFamily::SansSerif, 24.0, FontStyle::Bold),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())?;

    chart
        .configure_mesh()
        .x_desc(X_AXIS_LABEL)
        .y_desc(Y_AXIS_LABEL)
        .axis_desc_style(FontDesc::new(FontFamily::SansSerif, 16.0, FontStyle::Normal))
        .label_style(FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal))
        .x_label_formatter(&|v| format_tick(*v))
        .y_label_formatter(&|v| format_tick(*v))
        .bold_line_style(&BLACK.mix(0.15))
        .light_line_style(&BLACK.mix(0.05))
        .draw()?;

    for line in &panel.lines {
        let color = colors.color(&line.source);
        // non-positive values have no place on a log axis; pin them to the floor
        let points: Vec<(f64, f64)> = line
            .points
            .iter()
            .map(|&(x, y)| (x, y.max(y_floor)))
            .collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(line.source.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(2))
            });
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 5, color.filled())))?;
    }

    if !panel.lines.is_empty() {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK.mix(0.3))
            .label_font(FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal))
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    Ok(())
}

/// Positive data extent padded to leave room around the outermost markers
fn log_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return 1.0..10.0;
    }
    (lo / 1.5)..(hi * 1.5)
}

fn format_tick(v: f64) -> String {
    if v >= 1.0 {
        format!("{:.0}", v)
    } else {
        let s = format!("{:.3}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{PanelRow, PlotLine};
    use crate::types::BenchKind;
    use tempfile::TempDir;

    fn panel(kind: BenchKind, lines: Vec<PlotLine>) -> Panel {
        Panel {
            title: format!("{} Rescan Performance (1 thread)", kind),
            kind,
            threads: 1,
            lines,
        }
    }

    #[test]
    fn test_log_range() {
        assert_eq!(log_range([3.0, 30.0].into_iter()), 2.0..45.0);
        assert_eq!(log_range([0.0, -1.0, f64::NAN].into_iter()), 1.0..10.0);
        let single = log_range(std::iter::once(10.0));
        assert!(single.start < 10.0 && single.end > 10.0);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(100.0), "100");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(0.25), "0.25");
    }

    #[test]
    fn test_render_writes_png() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("chart.png");
        let plan = FigurePlan {
            rows: vec![PanelRow {
                threads: 1,
                panels: [
                    panel(
                        BenchKind::Fast,
                        vec![PlotLine {
                            source: "abc123".to_string(),
                            points: vec![(1.0, 0.0), (10.0, 0.5), (100.0, 0.75)],
                        }],
                    ),
                    panel(BenchKind::Slow, Vec::new()),
                ],
            }],
        };
        let colors = ColorMap::for_sources(&["abc123".to_string()]);
        let options = RenderOptions {
            width: 800,
            row_height: 300,
            font: None,
        };

        render_figure(&plan, &colors, &options, &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        // only the final image is left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_empty_plan_is_rejected() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("chart.png");
        let options = RenderOptions {
            width: 800,
            row_height: 300,
            font: None,
        };

        let err = render_figure(&FigurePlan::default(), &ColorMap::default(), &options, &output)
            .unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
        assert!(!output.exists());
    }
}
