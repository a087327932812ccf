use dashboard_core::formatting::format_count;
use ratatui::text::{Line, Span};

use crate::themes::Theme;

/// Headline number: a label line above the thousands-separated total.
pub struct Metric<'a> {
    pub label: &'a str,
    pub value: u64,
    pub theme: &'a Theme,
}

impl<'a> Metric<'a> {
    pub fn new(label: &'a str, value: u64, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(self.label, self.theme.metric_label)),
            Line::from(Span::styled(format_count(self.value), self.theme.metric_value)),
        ]
    }
}
