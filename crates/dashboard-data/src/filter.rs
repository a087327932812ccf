//! Inclusive date-range filtering over the daily table.

use dashboard_core::date_range::DateRange;
use dashboard_core::models::DailyRecord;

/// The daily rows whose date falls inside a range, in source order.
///
/// Borrows from the dataset; the underlying records are never copied or
/// mutated.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    range: DateRange,
    rows: Vec<&'a DailyRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn rows(&self) -> &[&'a DailyRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of `cnt` over the view.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a DailyRecord> + '_ {
        self.rows.iter().copied()
    }
}

/// Keep every record with `range.start() <= date <= range.end()`.
///
/// Any well-formed range is accepted. A range that misses the data entirely
/// yields an empty view.
pub fn filter_by_date<'a>(records: &'a [DailyRecord], range: &DateRange) -> FilteredView<'a> {
    FilteredView {
        range: *range,
        rows: records.iter().filter(|r| range.contains(r.date)).collect(),
    }
}
