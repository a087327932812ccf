//! Group-and-sum over a filtered daily view.
//!
//! Each analysis mode maps a record onto a [`CategoryKey`]; counts are summed
//! per key in a `BTreeMap`, so rows always come out in natural key order.
//! Bar modes then tag the largest category for emphasis.

use std::collections::BTreeMap;

use dashboard_core::models::{AnalysisMode, CategoryKey, DailyRecord, Summary, SummaryRow};

/// Stateless aggregation entry points, one per analysis mode.
pub struct Aggregator;

impl Aggregator {
    /// Dispatch on `mode`.
    pub fn aggregate<'a, I>(mode: AnalysisMode, records: I) -> Summary
    where
        I: IntoIterator<Item = &'a DailyRecord>,
    {
        match mode {
            AnalysisMode::Seasonal => Self::seasonal(records),
            AnalysisMode::Weather => Self::weather(records),
            AnalysisMode::WeekdayWeekend => Self::weekday_weekend(records),
            AnalysisMode::Monthly => Self::monthly(records),
        }
    }

    /// Sum by season name. At most four rows, Spring first.
    pub fn seasonal<'a, I>(records: I) -> Summary
    where
        I: IntoIterator<Item = &'a DailyRecord>,
    {
        Self::summarise(AnalysisMode::Seasonal, records, |r| {
            CategoryKey::Season(r.season)
        })
    }

    /// Sum by raw weather code, ascending.
    pub fn weather<'a, I>(records: I) -> Summary
    where
        I: IntoIterator<Item = &'a DailyRecord>,
    {
        Self::summarise(AnalysisMode::Weather, records, |r| {
            CategoryKey::Weather(r.weather)
        })
    }

    /// Sum by weekend flag. At most two rows, weekdays (`0`) first.
    pub fn weekday_weekend<'a, I>(records: I) -> Summary
    where
        I: IntoIterator<Item = &'a DailyRecord>,
    {
        Self::summarise(AnalysisMode::WeekdayWeekend, records, |r| {
            CategoryKey::Weekend(r.is_weekend())
        })
    }

    /// Sum by `(year, month)`. Never highlighted.
    pub fn monthly<'a, I>(records: I) -> Summary
    where
        I: IntoIterator<Item = &'a DailyRecord>,
    {
        Self::summarise(AnalysisMode::Monthly, records, |r| CategoryKey::Month {
            year: r.year,
            month: r.month,
        })
    }

    fn summarise<'a, I, F>(mode: AnalysisMode, records: I, key_fn: F) -> Summary
    where
        I: IntoIterator<Item = &'a DailyRecord>,
        F: Fn(&DailyRecord) -> CategoryKey,
    {
        let mut groups: BTreeMap<CategoryKey, u64> = BTreeMap::new();
        let mut total = 0u64;

        for record in records {
            *groups.entry(key_fn(record)).or_insert(0) += record.count;
            total += record.count;
        }

        let rows: Vec<SummaryRow> = groups
            .into_iter()
            .map(|(key, count)| SummaryRow { key, count })
            .collect();

        let highlight = if mode.highlights_max() {
            max_index(&rows)
        } else {
            None
        };

        Summary {
            mode,
            rows,
            total,
            highlight,
        }
    }
}

/// Index of the largest count. Ties go to the earliest row.
pub fn max_index(rows: &[SummaryRow]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (idx, row) in rows.iter().enumerate() {
        match best {
            Some((_, count)) if row.count <= count => {}
            _ => best = Some((idx, row.count)),
        }
    }
    best.map(|(idx, _)| idx)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
