//! Calendar-date parsing and the inclusive [`DateRange`] used by the filter.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::ValidationError;

/// Date-only layouts accepted in the `dteday` column, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Date-time layouts whose date part is kept.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a calendar date from a CSV cell.
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

// ── DateRange ─────────────────────────────────────────────────────────────────

/// Closed interval `[start, end]` of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Smallest range covering every date in `dates`, or `None` when empty.
    pub fn spanning<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut iter = dates.into_iter();
        let first = iter.next()?;
        let (start, end) = iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether `other` lies entirely inside this range.
    pub fn covers(&self, other: &DateRange) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// Number of calendar days in the range, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Clamp a single date into this range.
    pub fn clamp_date(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.start, self.end)
    }

    /// Intersect with `bounds`, clamping each end.
    ///
    /// A range lying entirely outside `bounds` collapses onto the nearest
    /// bound.
    pub fn clamp_to(&self, bounds: &DateRange) -> DateRange {
        let start = bounds.clamp_date(self.start);
        let end = bounds.clamp_date(self.end);
        DateRange { start, end }
    }

    /// Fail with [`ValidationError::OutOfBounds`] unless `bounds` covers this
    /// range.
    pub fn ensure_within(&self, bounds: &DateRange) -> Result<(), ValidationError> {
        if bounds.covers(self) {
            Ok(())
        } else {
            Err(ValidationError::OutOfBounds {
                start: self.start,
                end: self.end,
                min: bounds.start,
                max: bounds.end,
            })
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.start, self.end)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(a: NaiveDate, b: NaiveDate) -> DateRange {
        DateRange::new(a, b).unwrap()
    }

    // ── parse_date ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(parse_date("2011-01-01"), Some(date(2011, 1, 1)));
    }

    #[test]
    fn test_parse_date_slashes() {
        assert_eq!(parse_date("2012/12/31"), Some(date(2012, 12, 31)));
        assert_eq!(parse_date("03/15/2012"), Some(date(2012, 3, 15)));
    }

    #[test]
    fn test_parse_date_datetime_keeps_date_part() {
        assert_eq!(parse_date("2011-06-01 13:00:00"), Some(date(2011, 6, 1)));
        assert_eq!(parse_date("2011-06-01T00:00:00"), Some(date(2011, 6, 1)));
    }

    #[test]
    fn test_parse_date_trims_whitespace() {
        assert_eq!(parse_date("  2011-02-03 "), Some(date(2011, 2, 3)));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2011-13-01"), None);
    }

    // ── DateRange::new ────────────────────────────────────────────────────────

    #[test]
    fn test_new_accepts_single_day() {
        let r = range(date(2011, 1, 1), date(2011, 1, 1));
        assert_eq!(r.days(), 1);
    }

    #[test]
    fn test_new_rejects_inverted() {
        let err = DateRange::new(date(2011, 2, 1), date(2011, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvertedRange {
                start: date(2011, 2, 1),
                end: date(2011, 1, 1)
            }
        );
    }

    // ── spanning ──────────────────────────────────────────────────────────────

    #[test]
    fn test_spanning_finds_min_and_max() {
        let r = DateRange::spanning(vec![date(2011, 5, 1), date(2011, 1, 1), date(2012, 2, 1)])
            .unwrap();
        assert_eq!(r.start(), date(2011, 1, 1));
        assert_eq!(r.end(), date(2012, 2, 1));
    }

    #[test]
    fn test_spanning_empty_is_none() {
        assert!(DateRange::spanning(Vec::new()).is_none());
    }

    // ── contains / clamp ──────────────────────────────────────────────────────

    #[test]
    fn test_contains_is_inclusive() {
        let r = range(date(2011, 1, 1), date(2011, 1, 31));
        assert!(r.contains(date(2011, 1, 1)));
        assert!(r.contains(date(2011, 1, 31)));
        assert!(!r.contains(date(2011, 2, 1)));
        assert!(!r.contains(date(2010, 12, 31)));
    }

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = range(date(2011, 1, 1), date(2012, 12, 31));
        let wide = range(date(2010, 6, 1), date(2013, 6, 1));
        assert_eq!(wide.clamp_to(&bounds), bounds);
    }

    #[test]
    fn test_clamp_to_disjoint_collapses() {
        let bounds = range(date(2011, 1, 1), date(2012, 12, 31));
        let later = range(date(2014, 1, 1), date(2014, 2, 1));
        let clamped = later.clamp_to(&bounds);
        assert_eq!(clamped.start(), date(2012, 12, 31));
        assert_eq!(clamped.end(), date(2012, 12, 31));
    }

    #[test]
    fn test_ensure_within() {
        let bounds = range(date(2011, 1, 1), date(2012, 12, 31));
        assert!(range(date(2011, 3, 1), date(2011, 4, 1))
            .ensure_within(&bounds)
            .is_ok());
        let err = range(date(2010, 3, 1), date(2011, 4, 1))
            .ensure_within(&bounds)
            .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfBounds { .. }));
    }

    #[test]
    fn test_display() {
        let r = range(date(2011, 1, 1), date(2011, 1, 3));
        assert_eq!(r.to_string(), "2011-01-01 – 2011-01-03");
    }
}
