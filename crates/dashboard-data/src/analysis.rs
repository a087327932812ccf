//! Filter-then-aggregate pipeline for one dashboard view.
//!
//! Takes the loaded [`Dataset`], a validated range and a mode, and returns an
//! [`AnalysisResult`] ready for the UI layer or for JSON export.

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use dashboard_core::date_range::DateRange;
use dashboard_core::models::{AnalysisMode, Summary};

use crate::aggregator::Aggregator;
use crate::dataset::Dataset;
use crate::filter::filter_by_date;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the summary.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when this result was generated.
    pub generated_at: String,
    /// Daily rows inside the selected range.
    pub records_in_range: usize,
    /// Daily rows in the whole dataset.
    pub records_total: usize,
    /// Wall-clock seconds spent filtering and aggregating.
    pub transform_time_seconds: f64,
}

/// The complete output of [`run_analysis`].
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub range: DateRange,
    pub mode: AnalysisMode,
    pub summary: Summary,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Grand total of the filtered counts.
    pub fn total(&self) -> u64 {
        self.summary.total
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Filter `dataset` to `range` and aggregate it for `mode`.
///
/// The range is applied as-is; callers validate it against the dataset bounds
/// first. An empty selection produces the zero-state summary.
pub fn run_analysis(dataset: &Dataset, range: &DateRange, mode: AnalysisMode) -> AnalysisResult {
    let started = std::time::Instant::now();

    let view = filter_by_date(dataset.daily(), range);
    let summary = Aggregator::aggregate(mode, view.iter());

    let transform_time = started.elapsed().as_secs_f64();
    debug!(
        "{mode} over {range}: {} rows in range, {} categories, total {}",
        view.len(),
        summary.rows.len(),
        summary.total
    );

    AnalysisResult {
        range: *range,
        mode,
        metadata: AnalysisMetadata {
            generated_at: Utc::now().to_rfc3339(),
            records_in_range: view.len(),
            records_total: dataset.daily().len(),
            transform_time_seconds: transform_time,
        },
        summary,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
