//! Headless export of the current view.
//!
//! `.svg` targets are drawn with [`plotters`] using the same colours and
//! labels as the terminal chart; `.json` targets receive the serialised
//! [`AnalysisResult`].

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use dashboard_core::error::{RenderError, Result};
use dashboard_core::formatting::{format_axis_value, format_count};
use dashboard_core::models::{AnalysisMode, Summary};
use dashboard_data::analysis::AnalysisResult;

use crate::chart_view::year_series;

/// SVG canvas size in pixels.
pub const CANVAS_SIZE: (u32, u32) = (1000, 600);

const HEADER_HEIGHT: i32 = 90;
const BASE_COLOR: RGBColor = RGBColor(0x90, 0xCA, 0xF9);
const HIGHLIGHT_COLOR: RGBColor = RGBColor(0x00, 0x96, 0xC7);
const YEAR_COLORS: [RGBColor; 4] = [
    HIGHLIGHT_COLOR,
    RGBColor(0xF4, 0xA2, 0x61),
    RGBColor(0x2A, 0x9D, 0x8F),
    RGBColor(0xE7, 0x6F, 0x51),
];

// ── Format detection ──────────────────────────────────────────────────────────

/// Output kinds selected by the export path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> std::result::Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(ExportFormat::Svg),
            Some("json") => Ok(ExportFormat::Json),
            _ => Err(RenderError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Write `result` to `path` in the format its extension names.
pub fn export(result: &AnalysisResult, path: &Path) -> Result<()> {
    let content = match ExportFormat::from_path(path)? {
        ExportFormat::Svg => render_svg_string(&result.summary, result.total())?,
        ExportFormat::Json => serde_json::to_string_pretty(result)?,
    };

    std::fs::write(path, content).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        mode = %result.mode,
        range = %result.range,
        "exported dashboard view"
    );
    Ok(())
}

/// Render `summary` as a standalone SVG document.
pub fn render_svg_string(summary: &Summary, total: u64) -> std::result::Result<String, RenderError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CANVAS_SIZE).into_drawing_area();
        draw_summary(&root, summary, total)?;
        root.present().map_err(drawing_error)?;
    }
    Ok(svg)
}

// ── Drawing ───────────────────────────────────────────────────────────────────

fn drawing_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Axis maximum with 10% headroom above the largest value.
fn axis_max(max: u64) -> u64 {
    (max + max.div_ceil(10)).max(1)
}

fn draw_summary<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    summary: &Summary,
    total: u64,
) -> std::result::Result<(), RenderError> {
    root.fill(&WHITE).map_err(drawing_error)?;

    let (header, body) = root.split_vertically(HEADER_HEIGHT);
    header
        .draw(&Text::new(
            summary.mode.chart_title(),
            (20, 15),
            ("sans-serif", 28),
        ))
        .map_err(drawing_error)?;
    header
        .draw(&Text::new(
            format!("Total Transactions: {}", format_count(total)),
            (20, 55),
            ("sans-serif", 20).into_font().color(&HIGHLIGHT_COLOR),
        ))
        .map_err(drawing_error)?;

    if summary.is_empty() {
        let (w, h) = body.dim_in_pixel();
        return body
            .draw(&Text::new(
                "No transactions in the selected range",
                (w as i32 / 2 - 180, h as i32 / 2),
                ("sans-serif", 22).into_font().color(&BLACK.mix(0.6)),
            ))
            .map_err(drawing_error);
    }

    match summary.mode {
        AnalysisMode::Monthly => draw_lines(&body, summary),
        _ => draw_bars(&body, summary),
    }
}

fn draw_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    summary: &Summary,
) -> std::result::Result<(), RenderError> {
    let labels: Vec<String> = summary.rows.iter().map(|r| r.label()).collect();
    let n = labels.len() as i32;

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(100)
        .build_cartesian_2d((0..n).into_segmented(), 0u64..axis_max(summary.max_count()))
        .map_err(drawing_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(summary.mode.x_label())
        .y_desc(summary.mode.y_label())
        .x_labels(labels.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| format_count(*v))
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(drawing_error)?;

    chart
        .draw_series(summary.rows.iter().enumerate().map(|(i, row)| {
            let color = if summary.highlight == Some(i) {
                HIGHLIGHT_COLOR
            } else {
                BASE_COLOR
            };
            let x = i as i32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(x), 0),
                    (SegmentValue::Exact(x + 1), row.count),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 12, 12);
            bar
        }))
        .map_err(drawing_error)?;

    Ok(())
}

fn draw_lines<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    summary: &Summary,
) -> std::result::Result<(), RenderError> {
    let y_max = axis_max(summary.max_count()) as f64;

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(100)
        .build_cartesian_2d(1f64..12f64, 0f64..y_max)
        .map_err(drawing_error)?;

    chart
        .configure_mesh()
        .x_desc(summary.mode.x_label())
        .y_desc(summary.mode.y_label())
        .x_labels(12)
        .x_label_formatter(&|m| format!("{:.0}", m))
        .y_label_formatter(&|v| format_axis_value(*v))
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(drawing_error)?;

    for (idx, (year, points)) in year_series(summary).into_iter().enumerate() {
        let color = YEAR_COLORS[idx % YEAR_COLORS.len()];
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(drawing_error)?
            .label(year.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))
            .map_err(drawing_error)?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing_error)?;

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::date_range::DateRange;
    use dashboard_core::models::{CategoryKey, Season, SummaryRow};
    use dashboard_data::analysis::AnalysisMetadata;
    use tempfile::TempDir;

    fn seasonal() -> Summary {
        Summary {
            mode: AnalysisMode::Seasonal,
            rows: vec![
                SummaryRow {
                    key: CategoryKey::Season(Season::Spring),
                    count: 471_348,
                },
                SummaryRow {
                    key: CategoryKey::Season(Season::Summer),
                    count: 918_589,
                },
            ],
            total: 1_389_937,
            highlight: Some(1),
        }
    }

    fn monthly() -> Summary {
        let row = |year, month, count| SummaryRow {
            key: CategoryKey::Month { year, month },
            count,
        };
        Summary {
            mode: AnalysisMode::Monthly,
            rows: vec![row(2011, 1, 38_189), row(2011, 2, 48_215), row(2012, 1, 96_744)],
            total: 183_148,
            highlight: None,
        }
    }

    fn result(summary: Summary) -> AnalysisResult {
        let d = |m, day| NaiveDate::from_ymd_opt(2011, m, day).unwrap();
        AnalysisResult {
            range: DateRange::new(d(1, 1), d(12, 31)).unwrap(),
            mode: summary.mode,
            metadata: AnalysisMetadata {
                generated_at: "2024-01-01T00:00:00+00:00".to_string(),
                records_in_range: 365,
                records_total: 731,
                transform_time_seconds: 0.0,
            },
            summary,
        }
    }

    // ── ExportFormat ──────────────────────────────────────────────────────────

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.svg")).unwrap(),
            ExportFormat::Svg
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("OUT.JSON")).unwrap(),
            ExportFormat::Json
        );
        assert!(matches!(
            ExportFormat::from_path(Path::new("out.png")),
            Err(RenderError::UnsupportedFormat(_))
        ));
        assert!(ExportFormat::from_path(Path::new("noext")).is_err());
    }

    // ── render_svg_string ─────────────────────────────────────────────────────

    #[test]
    fn test_svg_bar_chart_uses_both_colours() {
        let svg = render_svg_string(&seasonal(), 1_389_937).unwrap().to_uppercase();
        assert!(svg.contains("<SVG"));
        assert!(svg.contains("#0096C7"));
        assert!(svg.contains("#90CAF9"));
        assert!(svg.contains("TOTAL TRANSACTIONS BY SEASON"));
        assert!(svg.contains("1,389,937"));
    }

    #[test]
    fn test_svg_line_chart_renders() {
        let svg = render_svg_string(&monthly(), 183_148).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("2011"));
        assert!(svg.contains("2012"));
    }

    #[test]
    fn test_svg_zero_state() {
        let svg = render_svg_string(&Summary::empty(AnalysisMode::Weather), 0).unwrap();
        assert!(svg.contains("No transactions in the selected range"));
    }

    #[test]
    fn test_axis_max_headroom() {
        assert_eq!(axis_max(0), 1);
        assert_eq!(axis_max(100), 110);
    }

    // ── export ────────────────────────────────────────────────────────────────

    #[test]
    fn test_export_json_writes_summary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("view.json");

        export(&result(seasonal()), &path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["mode"], "seasonal");
        assert_eq!(json["summary"]["total"], 1_389_937);
        assert_eq!(json["summary"]["highlight"], 1);
    }

    #[test]
    fn test_export_svg_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("view.svg");

        export(&result(monthly()), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_export_write_failure_is_render_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("view.svg");

        let err = export(&result(seasonal()), &path).unwrap_err();
        assert!(matches!(
            err,
            dashboard_core::error::DashboardError::Render(RenderError::Write { .. })
        ));
    }

    #[test]
    fn test_export_rejects_unknown_extension() {
        let err = export(&result(seasonal()), Path::new("view.bmp")).unwrap_err();
        assert!(err.to_string().contains("Unsupported export format"));
    }
}
