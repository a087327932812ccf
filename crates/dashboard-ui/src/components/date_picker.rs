//! Start / end date picker bounded by the dataset's date range.
//!
//! [`DateSelection`] holds the pending values the user is editing. Every edit
//! is clamped to the bounds, but the two ends are moved independently, so the
//! selection may be inverted; the controller rejects that case.

use chrono::{Days, NaiveDate};
use ratatui::text::{Line, Span};

use dashboard_core::date_range::DateRange;

use crate::themes::Theme;

/// Which end of the range a key press edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

/// The two dates currently shown in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSelection {
    pub start: NaiveDate,
    pub end: NaiveDate,
    bounds: DateRange,
}

impl DateSelection {
    /// Start from `range`, clamped into `bounds`.
    pub fn new(range: DateRange, bounds: DateRange) -> Self {
        Self {
            start: bounds.clamp_date(range.start()),
            end: bounds.clamp_date(range.end()),
            bounds,
        }
    }

    pub fn bounds(&self) -> DateRange {
        self.bounds
    }

    pub fn get(&self, field: DateField) -> NaiveDate {
        match field {
            DateField::Start => self.start,
            DateField::End => self.end,
        }
    }

    fn set(&mut self, field: DateField, date: NaiveDate) {
        let date = self.bounds.clamp_date(date);
        match field {
            DateField::Start => self.start = date,
            DateField::End => self.end = date,
        }
    }

    /// Move one end by `days`, stopping at the bounds.
    pub fn shift(&mut self, field: DateField, days: i64) {
        let current = self.get(field);
        let step = Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            current.checked_add_days(step)
        } else {
            current.checked_sub_days(step)
        };
        let target = moved.unwrap_or(if days >= 0 {
            self.bounds.end()
        } else {
            self.bounds.start()
        });
        self.set(field, target);
    }

    /// Jump one end to the earliest available date.
    pub fn to_min(&mut self, field: DateField) {
        self.set(field, self.bounds.start());
    }

    /// Jump one end to the latest available date.
    pub fn to_max(&mut self, field: DateField) {
        self.set(field, self.bounds.end());
    }

    pub fn reset(&mut self) {
        self.start = self.bounds.start();
        self.end = self.bounds.end();
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Two-line view of a [`DateSelection`], highlighting the focused field.
pub struct DatePicker<'a> {
    pub selection: &'a DateSelection,
    pub focus: Option<DateField>,
    pub theme: &'a Theme,
}

impl<'a> DatePicker<'a> {
    pub fn new(selection: &'a DateSelection, focus: Option<DateField>, theme: &'a Theme) -> Self {
        Self {
            selection,
            focus,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let bounds = self.selection.bounds();
        vec![
            self.field_line("Start", DateField::Start),
            self.field_line("End  ", DateField::End),
            Line::from(Span::styled(
                format!("available {} to {}", bounds.start(), bounds.end()),
                self.theme.dim,
            )),
        ]
    }

    fn field_line(&self, name: &'static str, field: DateField) -> Line<'a> {
        let focused = self.focus == Some(field);
        let value_style = if focused {
            self.theme.selected
        } else {
            self.theme.value
        };
        let (left, right) = if focused { ("◀ ", " ▶") } else { ("  ", "  ") };
        Line::from(vec![
            Span::styled(format!("{name}: "), self.theme.label),
            Span::styled(left, self.theme.dim),
            Span::styled(self.selection.get(field).to_string(), value_style),
            Span::styled(right, self.theme.dim),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
