use ratatui::style::{Color, Modifier, Style};

/// Bar fill for every non-emphasised category (`#90CAF9`).
pub const BAR_BASE: Color = Color::Rgb(0x90, 0xCA, 0xF9);

/// Bar fill for the largest category (`#0096C7`).
pub const BAR_HIGHLIGHT: Color = Color::Rgb(0x00, 0x96, 0xC7);

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light. If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Every style the dashboard widgets draw with.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,
    pub error: Style,

    // ── Controls ─────────────────────────────────────────────────────────────
    /// Border of the control that currently has keyboard focus.
    pub focus_border: Style,
    pub border: Style,
    /// The chosen option in the mode selector.
    pub selected: Style,

    // ── Chart ────────────────────────────────────────────────────────────────
    pub bar_base: Style,
    pub bar_highlight: Style,
    pub bar_value: Style,
    pub axis: Style,
    /// One colour per year in the monthly line chart, cycled.
    pub year_palette: Vec<Color>,

    // ── Metric ───────────────────────────────────────────────────────────────
    pub metric_label: Style,
    pub metric_value: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            focus_border: Style::default().fg(Color::Cyan),
            border: Style::default().fg(Color::DarkGray),
            selected: Style::default()
                .fg(Color::Black)
                .bg(BAR_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),

            bar_base: Style::default().fg(BAR_BASE),
            bar_highlight: Style::default().fg(BAR_HIGHLIGHT),
            bar_value: Style::default().fg(Color::Black).bg(BAR_BASE),
            axis: Style::default().fg(Color::Gray),
            year_palette: vec![BAR_HIGHLIGHT, Color::Yellow, Color::Magenta, Color::Green],

            metric_label: Style::default().fg(Color::Gray),
            metric_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            focus_border: Style::default().fg(Color::Blue),
            border: Style::default().fg(Color::Gray),
            selected: Style::default()
                .fg(Color::White)
                .bg(BAR_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),

            bar_base: Style::default().fg(BAR_BASE),
            bar_highlight: Style::default().fg(BAR_HIGHLIGHT),
            bar_value: Style::default().fg(Color::Black).bg(BAR_BASE),
            axis: Style::default().fg(Color::DarkGray),
            year_palette: vec![BAR_HIGHLIGHT, Color::Red, Color::Magenta, Color::Green],

            metric_label: Style::default().fg(Color::DarkGray),
            metric_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Basic 8-colour ANSI palette, no bold and no RGB.
    ///
    /// The two bar colours fall back to their nearest ANSI neighbours.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            focus_border: Style::default().fg(Color::Cyan),
            border: Style::default().fg(Color::DarkGray),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),

            bar_base: Style::default().fg(Color::Cyan),
            bar_highlight: Style::default().fg(Color::Blue),
            bar_value: Style::default().fg(Color::Black).bg(Color::Cyan),
            axis: Style::default().fg(Color::White),
            year_palette: vec![Color::Cyan, Color::Yellow, Color::Magenta, Color::Green],

            metric_label: Style::default().fg(Color::Gray),
            metric_value: Style::default().fg(Color::White),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Fill style for one bar.
    pub fn bar_style(&self, highlighted: bool) -> Style {
        if highlighted {
            self.bar_highlight
        } else {
            self.bar_base
        }
    }

    /// Line colour for the `index`-th year series, cycling the palette.
    pub fn year_color(&self, index: usize) -> Color {
        if self.year_palette.is_empty() {
            return BAR_HIGHLIGHT;
        }
        self.year_palette[index % self.year_palette.len()]
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.focus_border
        } else {
            self.border
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Theme construction ───────────────────────────────────────────────────

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.warning.fg, Some(Color::Yellow));
        assert_eq!(t.error.fg, Some(Color::Red));
        assert_eq!(t.bar_base.fg, Some(Color::Rgb(144, 202, 249)));
        assert_eq!(t.bar_highlight.fg, Some(Color::Rgb(0, 150, 199)));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
        assert_eq!(t.bar_highlight.fg, Some(BAR_HIGHLIGHT));
    }

    #[test]
    fn test_classic_theme_avoids_rgb_and_bold() {
        let t = Theme::classic();
        assert!(!t.value.add_modifier.contains(Modifier::BOLD));
        assert!(!t.error.add_modifier.contains(Modifier::BOLD));
        assert!(!matches!(t.bar_base.fg, Some(Color::Rgb(..))));
        assert!(!matches!(t.bar_highlight.fg, Some(Color::Rgb(..))));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        let classic = Theme::from_name("classic");
        assert_eq!(classic.header.fg, Some(Color::Cyan));
        assert!(!classic.header.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("does-not-exist");
        assert!(t.header.fg.is_some());
    }

    // ── helpers ──────────────────────────────────────────────────────────────

    #[test]
    fn test_bar_style_distinguishes_highlight() {
        let t = Theme::dark();
        assert_eq!(t.bar_style(false).fg, Some(BAR_BASE));
        assert_eq!(t.bar_style(true).fg, Some(BAR_HIGHLIGHT));
    }

    #[test]
    fn test_year_color_cycles() {
        let t = Theme::dark();
        let n = t.year_palette.len();
        assert_eq!(t.year_color(0), t.year_color(n));
        assert_ne!(t.year_color(0), t.year_color(1));
    }

    #[test]
    fn test_border_style_focus() {
        let t = Theme::dark();
        assert_eq!(t.border_style(true).fg, Some(Color::Cyan));
        assert_eq!(t.border_style(false).fg, Some(Color::DarkGray));
    }
}
