use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

// ── Season ────────────────────────────────────────────────────────────────────

/// Meteorological season as encoded in the `season` column (1–4).
///
/// Variant order matches the code order, so sorting by `Season` sorts
/// Spring → Summer → Fall → Winter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Map a raw season code onto its name. Codes outside 1–4 yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            4 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
            Season::Winter => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// One row of the daily table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar day the row describes.
    pub date: NaiveDate,
    pub season: Season,
    /// Raw weather situation code, left unmapped.
    pub weather: u8,
    /// Day of week, 0–6.
    pub weekday: u8,
    /// Total rentals on this day.
    pub count: u64,
    /// Derived from `date`.
    pub year: i32,
    /// Derived from `date` (1–12).
    pub month: u32,
    /// Derived from `date` (1–31).
    pub day: u32,
}

impl DailyRecord {
    /// Build a record, deriving year / month / day from `date`.
    pub fn new(date: NaiveDate, season: Season, weather: u8, weekday: u8, count: u64) -> Self {
        Self {
            date,
            season,
            weather,
            weekday,
            count,
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    /// Weekday codes 5 and 6 count as weekend.
    pub fn is_weekend(&self) -> bool {
        self.weekday >= 5
    }
}

/// One row of the hourly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    /// Hour of day, 0–23.
    pub hour: u8,
    pub season: Season,
    pub weather: u8,
    pub weekday: u8,
    pub count: u64,
}

// ── AnalysisMode ──────────────────────────────────────────────────────────────

/// The four mutually exclusive aggregate views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    Seasonal,
    Weather,
    WeekdayWeekend,
    Monthly,
}

impl AnalysisMode {
    /// Selector order.
    pub const ALL: [AnalysisMode; 4] = [
        AnalysisMode::Seasonal,
        AnalysisMode::Weather,
        AnalysisMode::WeekdayWeekend,
        AnalysisMode::Monthly,
    ];

    /// Option text shown in the single-choice selector.
    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::Seasonal => "Seasonal Analysis",
            AnalysisMode::Weather => "Weather Analysis",
            AnalysisMode::WeekdayWeekend => "Weekdays vs Weekend",
            AnalysisMode::Monthly => "Monthly Transactions",
        }
    }

    /// Command-line spelling, as accepted by `--mode`.
    pub fn cli_name(self) -> &'static str {
        match self {
            AnalysisMode::Seasonal => "seasonal",
            AnalysisMode::Weather => "weather",
            AnalysisMode::WeekdayWeekend => "weekday-weekend",
            AnalysisMode::Monthly => "monthly",
        }
    }

    /// Section heading shown above the metric.
    pub fn heading(self) -> &'static str {
        match self {
            AnalysisMode::Seasonal => "Total Transactions by Season",
            AnalysisMode::Weather => "Total Transactions by Weather Type",
            AnalysisMode::WeekdayWeekend => "Total Transactions by Weekdays vs Weekend",
            AnalysisMode::Monthly => "Total Transactions by Month for Each Year",
        }
    }

    pub fn chart_title(self) -> &'static str {
        match self {
            AnalysisMode::Seasonal => "Total Transactions by Season",
            AnalysisMode::Weather => "Total Transactions by Weather",
            AnalysisMode::WeekdayWeekend => "Total Transactions by Weekdays/Weekend",
            AnalysisMode::Monthly => "Total Transactions by Month for Each Year",
        }
    }

    pub fn x_label(self) -> &'static str {
        match self {
            AnalysisMode::Seasonal => "Season",
            AnalysisMode::Weather => "Weather",
            AnalysisMode::WeekdayWeekend => "Day (0 = Weekday, 1 = Weekend)",
            AnalysisMode::Monthly => "Month",
        }
    }

    pub fn y_label(self) -> &'static str {
        "Total Number of Transactions (cnt)"
    }

    /// `true` for the bar-chart modes that emphasise their largest category.
    pub fn highlights_max(self) -> bool {
        !matches!(self, AnalysisMode::Monthly)
    }

    /// Position in [`Self::ALL`].
    pub fn index(self) -> usize {
        match self {
            AnalysisMode::Seasonal => 0,
            AnalysisMode::Weather => 1,
            AnalysisMode::WeekdayWeekend => 2,
            AnalysisMode::Monthly => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next option, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous option, wrapping around.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for AnalysisMode {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.cli_name() == wanted)
            .ok_or_else(|| DashboardError::Config(format!("unknown analysis mode: {s}")))
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Grouping key of one summary row.
///
/// Ordering follows each key's natural order, which is also the order rows
/// are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CategoryKey {
    Season(Season),
    Weather(u8),
    /// `true` for weekend days.
    Weekend(bool),
    Month { year: i32, month: u32 },
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Season(season) => f.write_str(season.name()),
            CategoryKey::Weather(code) => write!(f, "{code}"),
            CategoryKey::Weekend(is_weekend) => write!(f, "{}", u8::from(*is_weekend)),
            CategoryKey::Month { year, month } => write!(f, "{year}-{month:02}"),
        }
    }
}

/// One category and its summed transaction count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub key: CategoryKey,
    pub count: u64,
}

impl SummaryRow {
    pub fn label(&self) -> String {
        self.key.to_string()
    }
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub mode: AnalysisMode,
    /// Rows in ascending key order.
    pub rows: Vec<SummaryRow>,
    /// Sum of `cnt` over every filtered record.
    pub total: u64,
    /// Index into `rows` of the emphasised category (bar modes only).
    pub highlight: Option<usize>,
}

impl Summary {
    /// Zero-state summary for `mode`.
    pub fn empty(mode: AnalysisMode) -> Self {
        Self {
            mode,
            rows: Vec::new(),
            total: 0,
            highlight: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn highlighted(&self) -> Option<&SummaryRow> {
        self.highlight.and_then(|i| self.rows.get(i))
    }

    pub fn max_count(&self) -> u64 {
        self.rows.iter().map(|r| r.count).max().unwrap_or(0)
    }

    /// Distinct years present in a monthly summary, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .rows
            .iter()
            .filter_map(|r| match r.key {
                CategoryKey::Month { year, .. } => Some(year),
                _ => None,
            })
            .collect();
        years.dedup();
        years
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
