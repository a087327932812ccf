use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::error::DashboardError;
use crate::models::AnalysisMode;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive dashboard for daily bike-sharing transactions
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bike-dashboard",
    about = "Interactive dashboard for daily bike-sharing transactions",
    version
)]
pub struct Settings {
    /// Daily dataset (CSV with a header row)
    #[arg(long, default_value = "day.csv")]
    pub day_file: PathBuf,

    /// Hourly dataset (CSV with a header row)
    #[arg(long, default_value = "hour.csv")]
    pub hour_file: PathBuf,

    /// Initial analysis type
    #[arg(long, default_value = "seasonal", value_parser = ["seasonal", "weather", "weekday-weekend", "monthly"])]
    pub mode: String,

    /// First day of the initial date range (defaults to the earliest date)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day of the initial date range (defaults to the latest date)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (defaults to ~/.bike-dashboard/logs/bike-dashboard.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Render the selected view to a file (.svg chart or .json summary) and exit
    #[arg(long)]
    pub export: Option<PathBuf>,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, for tests.
    pub fn load_from_args(args: Vec<std::ffi::OsString>) -> Self {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` flag on top of the parsed values.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Typed view of `--mode`.
    pub fn analysis_mode(&self) -> Result<AnalysisMode, DashboardError> {
        self.mode.parse()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
