use dashboard_core::models::AnalysisMode;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Single-choice control listing the four analysis modes.
///
/// Each option renders as `(•) 1  Seasonal Analysis`, with the chosen one
/// drawn in the theme's `selected` style. Labels are padded to a common
/// display width so the selection bar has a uniform length.
pub struct ModeSelector<'a> {
    pub selected: AnalysisMode,
    pub theme: &'a Theme,
}

impl<'a> ModeSelector<'a> {
    pub fn new(selected: AnalysisMode, theme: &'a Theme) -> Self {
        Self { selected, theme }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let width = AnalysisMode::ALL
            .iter()
            .map(|m| m.label().width())
            .max()
            .unwrap_or(0);

        AnalysisMode::ALL
            .iter()
            .map(|&mode| {
                let chosen = mode == self.selected;
                let marker = if chosen { "(•)" } else { "( )" };
                let label = mode.label();
                let padding = " ".repeat(width.saturating_sub(label.width()));
                let style = if chosen {
                    self.theme.selected
                } else {
                    self.theme.text
                };
                Line::from(vec![
                    Span::styled(format!("{marker} "), self.theme.label),
                    Span::styled(format!("{} ", mode.index() + 1), self.theme.dim),
                    Span::styled(format!(" {label}{padding} "), style),
                ])
            })
            .collect()
    }
}
