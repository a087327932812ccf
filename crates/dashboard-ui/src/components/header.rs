use crate::themes::Theme;
use dashboard_core::formatting::format_count;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. Loaded row counts in `[ N days | M hours ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Rows in the daily table.
    pub daily_records: usize,
    /// Rows in the hourly table.
    pub hourly_records: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(daily_records: usize, hourly_records: usize, theme: &'a Theme) -> Self {
        Self {
            daily_records,
            hourly_records,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" BIKE SHARING DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(
                    format!("{} days", format_count(self.daily_records as u64)),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} hours", format_count(self.hourly_records as u64)),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
