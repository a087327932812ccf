//! Terminal chart for one [`Summary`].
//!
//! Bar modes draw a [`BarChart`] where every bar uses the base colour except
//! the highlighted category. Monthly mode draws a line [`Chart`] with one
//! series per year over months 1–12. Values and axis ticks are formatted with
//! thousands separators. An empty summary draws a zero-state message instead.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    symbols,
    text::{Line, Span, Text},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use dashboard_core::formatting::{format_axis_value, format_count};
use dashboard_core::models::{AnalysisMode, CategoryKey, Summary};

use crate::themes::{Theme, BAR_BASE};

const BAR_GAP: u16 = 2;
const MIN_BAR_WIDTH: u16 = 5;
const MAX_BAR_WIDTH: u16 = 24;

/// Draw the chart for `summary` into `area`.
pub fn render_chart(frame: &mut Frame, area: Rect, summary: &Summary, theme: &Theme) {
    if summary.is_empty() {
        render_zero_state(frame, area, summary.mode, theme);
        return;
    }

    match summary.mode {
        AnalysisMode::Monthly => render_line_chart(frame, area, summary, theme),
        _ => render_bar_chart(frame, area, summary, theme),
    }
}

fn chart_block(mode: AnalysisMode, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {} ", mode.chart_title()), theme.header))
}

// ── Bar chart ─────────────────────────────────────────────────────────────────

/// Width of each bar so that all of them fit inside `inner_width`.
pub fn bar_width(inner_width: u16, bars: usize) -> u16 {
    if bars == 0 {
        return MIN_BAR_WIDTH;
    }
    let n = bars as u16;
    let available = inner_width.saturating_sub(BAR_GAP * n.saturating_sub(1));
    (available / n).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

fn render_bar_chart(frame: &mut Frame, area: Rect, summary: &Summary, theme: &Theme) {
    let bars: Vec<Bar> = summary
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let fill = theme.bar_style(summary.highlight == Some(idx));
            Bar::default()
                .value(row.count)
                .text_value(format_count(row.count))
                .label(Line::from(row.label()))
                .style(fill)
                .value_style(theme.bar_value.bg(fill.fg.unwrap_or(BAR_BASE)))
        })
        .collect();

    let axis_caption = Line::from(vec![
        Span::styled(format!(" x: {} ", summary.mode.x_label()), theme.axis),
        Span::styled(format!(" y: {} ", summary.mode.y_label()), theme.axis),
    ]);

    let block = chart_block(summary.mode, theme).title_bottom(axis_caption);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area.width.saturating_sub(2), bars.len()))
        .bar_gap(BAR_GAP)
        .label_style(theme.label)
        .max(summary.max_count().max(1));

    frame.render_widget(chart, area);
}

// ── Line chart ────────────────────────────────────────────────────────────────

/// `(month, count)` points for each year present in a monthly summary.
pub fn year_series(summary: &Summary) -> Vec<(i32, Vec<(f64, f64)>)> {
    summary
        .years()
        .into_iter()
        .map(|year| {
            let points = summary
                .rows
                .iter()
                .filter_map(|row| match row.key {
                    CategoryKey::Month { year: y, month } if y == year => {
                        Some((month as f64, row.count as f64))
                    }
                    _ => None,
                })
                .collect();
            (year, points)
        })
        .collect()
}

/// Evenly spaced y-axis tick labels from zero to `max`.
pub fn y_axis_labels(max: f64, ticks: usize) -> Vec<String> {
    let ticks = ticks.max(2);
    (0..ticks)
        .map(|i| format_axis_value(max * i as f64 / (ticks - 1) as f64))
        .collect()
}

fn render_line_chart(frame: &mut Frame, area: Rect, summary: &Summary, theme: &Theme) {
    let series = year_series(summary);
    let y_max = (summary.max_count() as f64 * 1.1).max(1.0);

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(idx, (year, points))| {
            Dataset::default()
                .name(year.to_string())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.year_color(idx)))
                .data(points)
        })
        .collect();

    let x_labels: Vec<Span> = (1..=12)
        .map(|m| Span::styled(m.to_string(), theme.axis))
        .collect();
    let y_labels: Vec<Span> = y_axis_labels(y_max, 5)
        .into_iter()
        .map(|l| Span::styled(l, theme.axis))
        .collect();

    let chart = Chart::new(datasets)
        .block(chart_block(summary.mode, theme))
        .x_axis(
            Axis::default()
                .title(Span::styled(summary.mode.x_label(), theme.label))
                .style(theme.axis)
                .bounds([1.0, 12.0])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(summary.mode.y_label(), theme.label))
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

// ── Zero state ────────────────────────────────────────────────────────────────

/// Placeholder for a range that contains no transactions.
pub fn render_zero_state(frame: &mut Frame, area: Rect, mode: AnalysisMode, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No transactions in the selected range",
            theme.warning,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Widen the date range or press 'r' to reset it.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .alignment(Alignment::Center)
            .block(chart_block(mode, theme)),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::{Season, SummaryRow};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn seasonal() -> Summary {
        Summary {
            mode: AnalysisMode::Seasonal,
            rows: vec![
                SummaryRow {
                    key: CategoryKey::Season(Season::Spring),
                    count: 150,
                },
                SummaryRow {
                    key: CategoryKey::Season(Season::Summer),
                    count: 200,
                },
            ],
            total: 350,
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
            rows: vec![
                row(2011, 1, 38_189),
                row(2011, 2, 48_215),
                row(2012, 1, 96_744),
                row(2012, 2, 103_137),
            ],
            total: 286_285,
            highlight: None,
        }
    }

    fn draw(summary: &Summary) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_chart(frame, frame.area(), summary, &theme))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    // ── bar_width ─────────────────────────────────────────────────────────────

    #[test]
    fn test_bar_width_fits_area() {
        assert_eq!(bar_width(78, 4), 18);
        assert_eq!(bar_width(10, 4), MIN_BAR_WIDTH);
        assert_eq!(bar_width(200, 2), MAX_BAR_WIDTH);
        assert_eq!(bar_width(50, 0), MIN_BAR_WIDTH);
    }

    // ── render_chart ──────────────────────────────────────────────────────────

    #[test]
    fn test_bar_chart_shows_title_labels_and_values() {
        let screen = draw(&seasonal());
        assert!(screen.contains("Total Transactions by Season"));
        assert!(screen.contains("Spring"));
        assert!(screen.contains("Summer"));
        assert!(screen.contains("200"));
    }

    #[test]
    fn test_bar_chart_highlight_colour() {
        let backend = TestBackend::new(40, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_chart(frame, frame.area(), &seasonal(), &theme))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let colours: Vec<_> = buffer.content().iter().map(|c| c.fg).collect();
        assert!(colours.contains(&crate::themes::BAR_HIGHLIGHT));
        assert!(colours.contains(&crate::themes::BAR_BASE));
    }

    #[test]
    fn test_line_chart_renders_without_panic() {
        let screen = draw(&monthly());
        assert!(screen.contains("Total Transactions by Month for Each Year"));
        assert!(screen.contains("Month"));
    }

    #[test]
    fn test_zero_state() {
        let screen = draw(&Summary::empty(AnalysisMode::Weather));
        assert!(screen.contains("No transactions in the selected range"));
    }

    // ── helpers ───────────────────────────────────────────────────────────────

    #[test]
    fn test_year_series_splits_by_year() {
        let series = year_series(&monthly());
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0, 2011);
        assert_eq!(series[0].1, vec![(1.0, 38_189.0), (2.0, 48_215.0)]);
        assert_eq!(series[1].0, 2012);
    }

    #[test]
    fn test_y_axis_labels_thousands_separated() {
        let labels = y_axis_labels(200_000.0, 5);
        assert_eq!(labels, vec!["0", "50,000", "100,000", "150,000", "200,000"]);
    }
}
