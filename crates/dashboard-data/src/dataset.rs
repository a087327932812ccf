//! The loaded, immutable pair of tables plus their date bounds.

use std::path::{Path, PathBuf};

use tracing::info;

use dashboard_core::date_range::DateRange;
use dashboard_core::error::LoadError;
use dashboard_core::models::{DailyRecord, HourlyRecord};

use crate::reader::{load_daily_records, load_hourly_records};

/// Both input tables, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    daily: Vec<DailyRecord>,
    hourly: Vec<HourlyRecord>,
    bounds: DateRange,
    day_file: PathBuf,
    hour_file: PathBuf,
}

impl Dataset {
    /// Load and validate both files. Any failure is fatal to the caller.
    pub fn load(day_file: &Path, hour_file: &Path) -> Result<Self, LoadError> {
        let daily = load_daily_records(day_file)?;
        let hourly = load_hourly_records(hour_file)?;

        let bounds = DateRange::spanning(daily.iter().map(|r| r.date))
            .ok_or_else(|| LoadError::EmptyDataset(day_file.to_path_buf()))?;

        info!(
            "Dataset ready: {} daily rows, {} hourly rows, {}",
            daily.len(),
            hourly.len(),
            bounds
        );

        Ok(Self {
            daily,
            hourly,
            bounds,
            day_file: day_file.to_path_buf(),
            hour_file: hour_file.to_path_buf(),
        })
    }

    /// Build a dataset from records already in memory.
    ///
    /// Returns `None` when `daily` is empty, since bounds are undefined.
    pub fn from_records(mut daily: Vec<DailyRecord>, hourly: Vec<HourlyRecord>) -> Option<Self> {
        daily.sort_by_key(|r| r.date);
        let bounds = DateRange::spanning(daily.iter().map(|r| r.date))?;
        Some(Self {
            daily,
            hourly,
            bounds,
            day_file: PathBuf::new(),
            hour_file: PathBuf::new(),
        })
    }

    /// Daily rows, ascending by date.
    pub fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }

    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    /// Earliest and latest `dteday` in the daily table.
    pub fn bounds(&self) -> DateRange {
        self.bounds
    }

    pub fn day_file(&self) -> &Path {
        &self.day_file
    }

    pub fn hour_file(&self) -> &Path {
        &self.hour_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::Season;
    use std::io::Write;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_computes_bounds() {
        let dir = TempDir::new().unwrap();
        let day = write(
            &dir,
            "day.csv",
            "dteday,season,weathersit,weekday,cnt\n\
             2011-03-05,1,1,6,10\n\
             2011-01-01,1,1,6,20\n\
             2011-12-31,4,2,6,30\n",
        );
        let hour = write(
            &dir,
            "hour.csv",
            "dteday,hr,season,weathersit,weekday,cnt\n2011-01-01,0,1,1,6,3\n",
        );

        let dataset = Dataset::load(&day, &hour).unwrap();
        assert_eq!(dataset.bounds().start(), date(2011, 1, 1));
        assert_eq!(dataset.bounds().end(), date(2011, 12, 31));
        assert_eq!(dataset.daily().len(), 3);
        assert_eq!(dataset.hourly().len(), 1);
        assert_eq!(dataset.day_file(), day.as_path());
    }

    #[test]
    fn test_load_fails_when_hourly_missing() {
        let dir = TempDir::new().unwrap();
        let day = write(
            &dir,
            "day.csv",
            "dteday,season,weathersit,weekday,cnt\n2011-01-01,1,1,6,20\n",
        );

        let err = Dataset::load(&day, &dir.path().join("hour.csv")).unwrap_err();
        assert!(matches!(err, LoadError::FileRead { .. }));
    }

    #[test]
    fn test_from_records_sorts_and_bounds() {
        let daily = vec![
            DailyRecord::new(date(2012, 1, 2), Season::Spring, 1, 1, 5),
            DailyRecord::new(date(2011, 6, 1), Season::Summer, 1, 3, 7),
        ];
        let dataset = Dataset::from_records(daily, Vec::new()).unwrap();
        assert_eq!(dataset.daily()[0].date, date(2011, 6, 1));
        assert_eq!(dataset.bounds().end(), date(2012, 1, 2));
    }

    #[test]
    fn test_from_records_empty_is_none() {
        assert!(Dataset::from_records(Vec::new(), Vec::new()).is_none());
    }
}
