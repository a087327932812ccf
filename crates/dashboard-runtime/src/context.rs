//! One-time data context for the dashboard runtime.
//!
//! Both tables are loaded exactly once at startup and then shared read-only
//! between the interactive loop and any export pass. Nothing in the context
//! changes after [`DataContext::initialize`] returns.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashboard_core::date_range::DateRange;
use dashboard_core::error::LoadError;
use dashboard_data::dataset::Dataset;

/// Immutable, cheaply clonable handle to the loaded dataset.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use dashboard_runtime::context::DataContext;
///
/// let ctx = DataContext::initialize(Path::new("day.csv"), Path::new("hour.csv"))?;
/// println!("data covers {}", ctx.bounds());
/// # Ok::<(), dashboard_core::error::LoadError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DataContext {
    dataset: Arc<Dataset>,
    /// Wall-clock time spent reading both files.
    load_time: Duration,
}

impl DataContext {
    /// Load both files. A failure here is fatal; there is no retry.
    pub fn initialize(day_file: &Path, hour_file: &Path) -> Result<Self, LoadError> {
        let started = Instant::now();
        let dataset = Dataset::load(day_file, hour_file).map_err(|e| {
            tracing::error!(error = %e, "failed to load dataset");
            e
        })?;
        let load_time = started.elapsed();

        tracing::info!(
            daily = dataset.daily().len(),
            hourly = dataset.hourly().len(),
            load_ms = load_time.as_millis() as u64,
            "data context initialised"
        );

        Ok(Self {
            dataset: Arc::new(dataset),
            load_time,
        })
    }

    /// Wrap a dataset that is already in memory.
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            load_time: Duration::ZERO,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Earliest and latest date in the daily table.
    pub fn bounds(&self) -> DateRange {
        self.dataset.bounds()
    }

    pub fn load_time(&self) -> Duration {
        self.load_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_initialize_loads_both_tables() {
        let dir = TempDir::new().unwrap();
        let day = write(
            &dir,
            "day.csv",
            "dteday,season,weathersit,weekday,cnt\n2011-01-01,1,1,6,985\n2011-01-02,1,2,0,801\n",
        );
        let hour = write(
            &dir,
            "hour.csv",
            "dteday,hr,season,weathersit,weekday,cnt\n2011-01-01,0,1,1,6,16\n",
        );

        let ctx = DataContext::initialize(&day, &hour).unwrap();
        assert_eq!(ctx.dataset().daily().len(), 2);
        assert_eq!(ctx.dataset().hourly().len(), 1);
        assert_eq!(ctx.bounds().days(), 2);
    }

    #[test]
    fn test_initialize_propagates_load_error() {
        let dir = TempDir::new().unwrap();
        let day = write(&dir, "day.csv", "dteday,season\n2011-01-01,1\n");
        let hour = write(&dir, "hour.csv", "dteday\n");

        let err = DataContext::initialize(&day, &hour).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));
    }

    #[test]
    fn test_clones_share_the_dataset() {
        let daily = vec![dashboard_core::models::DailyRecord::new(
            chrono::NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            dashboard_core::models::Season::Spring,
            1,
            6,
            1,
        )];
        let ctx = DataContext::from_dataset(Dataset::from_records(daily, Vec::new()).unwrap());
        let other = ctx.clone();
        assert!(std::ptr::eq(ctx.dataset(), other.dataset()));
        assert_eq!(ctx.load_time(), Duration::ZERO);
    }
}
