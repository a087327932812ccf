use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Failures while reading one of the two input tables.
///
/// Always fatal at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer rejected the file (bad quoting, invalid UTF-8, ...).
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A date cell did not match any recognised format.
    #[error("Invalid date '{value}' in {path} at line {line}")]
    InvalidDate {
        path: PathBuf,
        line: usize,
        value: String,
    },

    /// A numeric cell was empty, non-numeric, negative or out of range.
    #[error("Invalid value '{value}' for column '{column}' in {path} at line {line}")]
    InvalidValue {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
    },

    /// The file has a header but no data rows.
    #[error("No data rows found in {0}")]
    EmptyDataset(PathBuf),
}

/// A user-selected date range that cannot be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The start date lies after the end date.
    #[error("Start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    /// Part of the range lies outside the loaded data.
    #[error("Range {start} – {end} is outside the data bounds {min} – {max}")]
    OutOfBounds {
        start: NaiveDate,
        end: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
}

/// Chart output could not be produced.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The plotting backend reported a failure.
    #[error("Failed to draw chart: {0}")]
    Drawing(String),

    /// The export target has an extension we cannot produce.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Writing the rendered chart failed.
    #[error("Failed to write chart to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// All errors produced by the bike dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// A summary could not be serialised to JSON.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
