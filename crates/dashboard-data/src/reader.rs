//! CSV loading for the daily and hourly bike-sharing tables.
//!
//! Both files carry a header row. Columns are located by name, so extra
//! columns (`instant`, `temp`, `casual`, ...) and column order do not matter.
//! Any malformed row aborts the load with a [`LoadError`] naming the file,
//! line and column.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::debug;

use dashboard_core::date_range::parse_date;
use dashboard_core::error::LoadError;
use dashboard_core::models::{DailyRecord, HourlyRecord, Season};

// ── Column names ──────────────────────────────────────────────────────────────

pub const DATE_COLUMN: &str = "dteday";
pub const SEASON_COLUMN: &str = "season";
pub const WEATHER_COLUMN: &str = "weathersit";
pub const WEEKDAY_COLUMN: &str = "weekday";
pub const COUNT_COLUMN: &str = "cnt";
pub const HOUR_COLUMN: &str = "hr";

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the daily table, sorted by date.
pub fn load_daily_records(path: &Path) -> Result<Vec<DailyRecord>, LoadError> {
    let started = std::time::Instant::now();
    let mut reader = open_reader(path)?;
    let columns = CommonColumns::resolve(path, &header_map(&mut reader, path)?)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row = Row::new(path, &record, idx);
        let common = columns.parse(&row)?;
        records.push(DailyRecord::new(
            common.date,
            common.season,
            common.weather,
            common.weekday,
            common.count,
        ));
    }

    if records.is_empty() {
        return Err(LoadError::EmptyDataset(path.to_path_buf()));
    }

    records.sort_by_key(|r| r.date);

    debug!(
        "Loaded {} daily rows from {} in {:.3}s",
        records.len(),
        path.display(),
        started.elapsed().as_secs_f64()
    );

    Ok(records)
}

/// Load the hourly table, sorted by date then hour.
pub fn load_hourly_records(path: &Path) -> Result<Vec<HourlyRecord>, LoadError> {
    let started = std::time::Instant::now();
    let mut reader = open_reader(path)?;
    let headers = header_map(&mut reader, path)?;
    let columns = CommonColumns::resolve(path, &headers)?;
    let hour_idx = require_column(&headers, path, HOUR_COLUMN)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row = Row::new(path, &record, idx);
        let common = columns.parse(&row)?;
        let hour: u8 = row.parse_bounded(hour_idx, HOUR_COLUMN, 0..=23)?;
        records.push(HourlyRecord {
            date: common.date,
            hour,
            season: common.season,
            weather: common.weather,
            weekday: common.weekday,
            count: common.count,
        });
    }

    if records.is_empty() {
        return Err(LoadError::EmptyDataset(path.to_path_buf()));
    }

    records.sort_by_key(|r| (r.date, r.hour));

    debug!(
        "Loaded {} hourly rows from {} in {:.3}s",
        records.len(),
        path.display(),
        started.elapsed().as_secs_f64()
    );

    Ok(records)
}

// ── Header handling ───────────────────────────────────────────────────────────

fn open_reader(path: &Path) -> Result<csv::Reader<File>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn header_map(
    reader: &mut csv::Reader<File>,
    path: &Path,
) -> Result<HashMap<String, usize>, LoadError> {
    let headers = reader.headers().map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect())
}

/// Lowercase, trim and drop a leading UTF-8 BOM.
fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_lowercase()
}

fn require_column(
    headers: &HashMap<String, usize>,
    path: &Path,
    column: &str,
) -> Result<usize, LoadError> {
    headers
        .get(column)
        .copied()
        .ok_or_else(|| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

// ── Row parsing ───────────────────────────────────────────────────────────────

/// Column positions shared by both tables.
struct CommonColumns {
    date: usize,
    season: usize,
    weather: usize,
    weekday: usize,
    count: usize,
}

/// Values of the shared columns for one row.
struct CommonFields {
    date: NaiveDate,
    season: Season,
    weather: u8,
    weekday: u8,
    count: u64,
}

impl CommonColumns {
    fn resolve(path: &Path, headers: &HashMap<String, usize>) -> Result<Self, LoadError> {
        Ok(Self {
            date: require_column(headers, path, DATE_COLUMN)?,
            season: require_column(headers, path, SEASON_COLUMN)?,
            weather: require_column(headers, path, WEATHER_COLUMN)?,
            weekday: require_column(headers, path, WEEKDAY_COLUMN)?,
            count: require_column(headers, path, COUNT_COLUMN)?,
        })
    }

    fn parse(&self, row: &Row<'_>) -> Result<CommonFields, LoadError> {
        let date = row.parse_date(self.date)?;
        let season_code: u8 = row.parse_bounded(self.season, SEASON_COLUMN, 1..=4)?;
        let season = Season::from_code(season_code)
            .ok_or_else(|| row.invalid(self.season, SEASON_COLUMN))?;

        Ok(CommonFields {
            date,
            season,
            weather: row.parse_number(self.weather, WEATHER_COLUMN)?,
            weekday: row.parse_bounded(self.weekday, WEEKDAY_COLUMN, 0..=6)?,
            count: row.parse_number(self.count, COUNT_COLUMN)?,
        })
    }
}

/// One CSV record plus the context needed for error messages.
struct Row<'a> {
    path: &'a Path,
    record: &'a StringRecord,
    line: usize,
}

impl<'a> Row<'a> {
    fn new(path: &'a Path, record: &'a StringRecord, idx: usize) -> Self {
        // Header occupies line 1, so the n-th record (0-based) sits on n + 2.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        Self { path, record, line }
    }

    fn field(&self, idx: usize) -> &str {
        self.record.get(idx).unwrap_or("")
    }

    fn invalid(&self, idx: usize, column: &str) -> LoadError {
        LoadError::InvalidValue {
            path: self.path.to_path_buf(),
            line: self.line,
            column: column.to_string(),
            value: self.field(idx).to_string(),
        }
    }

    fn parse_date(&self, idx: usize) -> Result<NaiveDate, LoadError> {
        parse_date(self.field(idx)).ok_or_else(|| LoadError::InvalidDate {
            path: self.path.to_path_buf(),
            line: self.line,
            value: self.field(idx).to_string(),
        })
    }

    fn parse_number<T: FromStr>(&self, idx: usize, column: &str) -> Result<T, LoadError> {
        self.field(idx)
            .parse::<T>()
            .map_err(|_| self.invalid(idx, column))
    }

    fn parse_bounded<T>(
        &self,
        idx: usize,
        column: &str,
        bounds: std::ops::RangeInclusive<T>,
    ) -> Result<T, LoadError>
    where
        T: FromStr + PartialOrd,
    {
        let value: T = self.parse_number(idx, column)?;
        if bounds.contains(&value) {
            Ok(value)
        } else {
            Err(self.invalid(idx, column))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
