//! Main application state and TUI event loop for the bike-sharing dashboard.
//!
//! [`App`] owns the theme, keyboard focus, the date picker's pending values
//! and the [`DashboardController`]. Each key press that changes the mode or
//! the range becomes one [`Interaction`], which re-runs filter → aggregate
//! before the next frame is drawn.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use dashboard_core::models::AnalysisMode;
use dashboard_runtime::controller::{DashboardController, DashboardSnapshot, Interaction};

use crate::chart_view;
use crate::components::{DateField, DatePicker, DateSelection, Header, Metric, ModeSelector};
use crate::summary_table;
use crate::themes::Theme;

/// Days moved by PgUp / PgDn.
const PAGE_DAYS: i64 = 30;

// ── Focus ─────────────────────────────────────────────────────────────────────

/// Which control receives arrow-key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Mode,
    StartDate,
    EndDate,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Mode => Focus::StartDate,
            Focus::StartDate => Focus::EndDate,
            Focus::EndDate => Focus::Mode,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Mode => Focus::EndDate,
            Focus::StartDate => Focus::Mode,
            Focus::EndDate => Focus::StartDate,
        }
    }

    fn date_field(self) -> Option<DateField> {
        match self {
            Focus::Mode => None,
            Focus::StartDate => Some(DateField::Start),
            Focus::EndDate => Some(DateField::End),
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    controller: DashboardController,
    focus: Focus,
    /// Values shown in the date picker; may differ from the applied range
    /// after a rejected edit.
    selection: DateSelection,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, controller: DashboardController) -> Self {
        let snapshot = controller.snapshot();
        let selection = DateSelection::new(snapshot.range(), snapshot.bounds);
        Self {
            theme: Theme::from_name(theme_name),
            controller,
            focus: Focus::Mode,
            selection,
            should_quit: false,
        }
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        self.controller.snapshot()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selection(&self) -> &DateSelection {
        &self.selection
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop never
    /// blocks indefinitely on input.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                if let Some(mode) = AnalysisMode::from_index(index) {
                    self.select_mode(mode);
                }
            }
            KeyCode::Char('r') => {
                self.selection.reset();
                self.controller.handle(Interaction::ResetRange);
            }
            KeyCode::Up => match self.focus.date_field() {
                None => self.select_mode(self.snapshot().mode().previous()),
                Some(field) => self.edit_date(|s| s.shift(field, 1)),
            },
            KeyCode::Down => match self.focus.date_field() {
                None => self.select_mode(self.snapshot().mode().next()),
                Some(field) => self.edit_date(|s| s.shift(field, -1)),
            },
            KeyCode::Right => self.with_date_field(|s, field| s.shift(field, 1)),
            KeyCode::Left => self.with_date_field(|s, field| s.shift(field, -1)),
            KeyCode::PageUp => self.with_date_field(|s, field| s.shift(field, PAGE_DAYS)),
            KeyCode::PageDown => self.with_date_field(|s, field| s.shift(field, -PAGE_DAYS)),
            KeyCode::Home => self.with_date_field(|s, field| s.to_min(field)),
            KeyCode::End => self.with_date_field(|s, field| s.to_max(field)),
            _ => {}
        }
    }

    fn select_mode(&mut self, mode: AnalysisMode) {
        self.controller.handle(Interaction::SelectMode(mode));
    }

    fn with_date_field(&mut self, edit: impl FnOnce(&mut DateSelection, DateField)) {
        if let Some(field) = self.focus.date_field() {
            self.edit_date(|s| edit(s, field));
        }
    }

    /// Change the pending selection and submit it if it actually moved.
    fn edit_date(&mut self, edit: impl FnOnce(&mut DateSelection)) {
        let before = self.selection;
        edit(&mut self.selection);
        if self.selection != before {
            self.controller.handle(Interaction::SetRange {
                start: self.selection.start,
                end: self.selection.end,
            });
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let snapshot = self.snapshot();
        let theme = &self.theme;

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Length(6),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let header = Header::new(snapshot.daily_records, snapshot.hourly_records, theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), rows[0]);

        self.render_banner(frame, rows[1], snapshot);
        self.render_controls(frame, rows[2], snapshot);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(rows[3]);
        chart_view::render_chart(frame, body[0], &snapshot.analysis.summary, theme);
        summary_table::render_summary_table(frame, body[1], &snapshot.analysis.summary, theme);

        let help = Line::from(vec![
            Span::styled("Tab", theme.value),
            Span::styled(" focus  ", theme.dim),
            Span::styled("1-4", theme.value),
            Span::styled(" mode  ", theme.dim),
            Span::styled("←/→ PgUp/PgDn Home/End", theme.value),
            Span::styled(" dates  ", theme.dim),
            Span::styled("r", theme.value),
            Span::styled(" reset  ", theme.dim),
            Span::styled("q", theme.value),
            Span::styled(" quit", theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[4]);
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
        let line = match snapshot.banner() {
            Some(message) => {
                let style = if snapshot.error.is_some() {
                    self.theme.error
                } else {
                    self.theme.warning
                };
                Line::from(Span::styled(format!("⚠ {message}"), style))
            }
            None => Line::from(Span::styled(
                format!("Showing {}", snapshot.range()),
                self.theme.dim,
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
        let theme = &self.theme;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(32),
                Constraint::Length(34),
                Constraint::Min(20),
            ])
            .split(area);

        let selector = ModeSelector::new(snapshot.mode(), theme);
        frame.render_widget(
            Paragraph::new(Text::from(selector.to_lines())).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(self.focus == Focus::Mode))
                    .title(" Analysis Type "),
            ),
            cols[0],
        );

        let picker = DatePicker::new(&self.selection, self.focus.date_field(), theme);
        frame.render_widget(
            Paragraph::new(Text::from(picker.to_lines())).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(self.focus != Focus::Mode))
                    .title(" Date Range "),
            ),
            cols[1],
        );

        let metric = Metric::new("Total Transactions", snapshot.analysis.total(), theme);
        frame.render_widget(
            Paragraph::new(Text::from(metric.to_lines())).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border)
                    .title(format!(" {} ", snapshot.mode().heading())),
            ),
            cols[2],
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::error::ValidationError;
    use dashboard_core::models::{DailyRecord, Season};
    use dashboard_data::dataset::Dataset;
    use dashboard_runtime::context::DataContext;
    use ratatui::backend::TestBackend;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app() -> App {
        let daily = vec![
            DailyRecord::new(date(2011, 1, 1), Season::Spring, 1, 6, 100),
            DailyRecord::new(date(2011, 1, 2), Season::Spring, 2, 0, 50),
            DailyRecord::new(date(2011, 1, 3), Season::Summer, 1, 1, 200),
        ];
        let context = DataContext::from_dataset(Dataset::from_records(daily, Vec::new()).unwrap());
        let controller = DashboardController::new(context, AnalysisMode::Seasonal, None, None);
        App::new("dark", controller)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── Focus ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_focus_cycles_both_ways() {
        assert_eq!(Focus::Mode.next(), Focus::StartDate);
        assert_eq!(Focus::EndDate.next(), Focus::Mode);
        assert_eq!(Focus::Mode.previous(), Focus::EndDate);
    }

    // ── handle_key ────────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let app = app();
        assert_eq!(app.focus(), Focus::Mode);
        assert!(!app.should_quit);
        assert_eq!(app.snapshot().analysis.total(), 350);
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q')] {
            let mut app = app();
            press(&mut app, code);
            assert!(app.should_quit);
        }
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_number_keys_select_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.snapshot().mode(), AnalysisMode::Monthly);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.snapshot().mode(), AnalysisMode::Weather);
    }

    #[test]
    fn test_arrows_cycle_mode_when_selector_focused() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.snapshot().mode(), AnalysisMode::Weather);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.snapshot().mode(), AnalysisMode::Monthly);
    }

    #[test]
    fn test_date_edit_refilters() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selection().start, date(2011, 1, 2));
        assert_eq!(app.snapshot().range().start(), date(2011, 1, 2));
        assert_eq!(app.snapshot().analysis.total(), 250);
    }

    #[test]
    fn test_date_edit_at_bound_is_noop() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selection().start, date(2011, 1, 1));
        assert!(app.snapshot().error.is_none());
    }

    #[test]
    fn test_inverted_selection_shows_error_and_keeps_range() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Home);

        assert_eq!(app.selection().start, date(2011, 1, 3));
        assert_eq!(app.selection().end, date(2011, 1, 1));
        assert!(matches!(
            app.snapshot().error,
            Some(ValidationError::InvertedRange { .. })
        ));
        assert_eq!(app.snapshot().range().start(), date(2011, 1, 3));
        assert_eq!(app.snapshot().range().end(), date(2011, 1, 3));
    }

    #[test]
    fn test_reset_key_restores_bounds() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.selection().start, date(2011, 1, 1));
        assert_eq!(app.snapshot().range(), app.snapshot().bounds);
        assert!(app.snapshot().error.is_none());
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert!(!app.should_quit);
    }

    // ── render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_full_dashboard() {
        let app = app();
        let text = screen(&app, 120, 30);
        assert!(text.contains("BIKE SHARING DASHBOARD"));
        assert!(text.contains("Seasonal Analysis"));
        assert!(text.contains("Total Transactions"));
        assert!(text.contains("350"));
        assert!(text.contains("2011-01-01"));
    }

    #[test]
    fn test_render_banner_on_error() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Home);
        let text = screen(&app, 120, 30);
        assert!(text.contains("is after end date"));
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let app = app();
        let _ = screen(&app, 30, 10);
    }
}
