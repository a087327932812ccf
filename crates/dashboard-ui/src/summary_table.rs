//! Per-category summary table shown next to the chart.
//!
//! One row per category with its count and share of the grand total, followed
//! by a highlighted totals row.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use dashboard_core::formatting::{format_count, format_share};
use dashboard_core::models::Summary;

use crate::themes::Theme;

/// Display strings for one table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRowData {
    pub category: String,
    pub count: String,
    pub share: String,
    /// Whether this row is the chart's emphasised category.
    pub highlighted: bool,
}

/// Build the display rows for `summary`, excluding the totals row.
pub fn table_rows(summary: &Summary) -> Vec<TableRowData> {
    summary
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| TableRowData {
            category: row.label(),
            count: format_count(row.count),
            share: format_share(row.count, summary.total),
            highlighted: summary.highlight == Some(idx),
        })
        .collect()
}

/// Render the summary table into `area`.
pub fn render_summary_table(frame: &mut Frame, area: Rect, summary: &Summary, theme: &Theme) {
    let header = Row::new(
        [summary.mode.x_label(), "Transactions", "Share"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let mut rows: Vec<Row> = table_rows(summary)
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if row.highlighted {
                theme.bar_highlight
            } else if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.category),
                Cell::from(row.count),
                Cell::from(row.share),
            ])
            .style(style)
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            Cell::from(format_count(summary.total)),
            Cell::from(if summary.total > 0 { "100.0%" } else { "" }),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Min(12),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", summary.mode.heading())),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
