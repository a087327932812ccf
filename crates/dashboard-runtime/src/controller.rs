//! Per-interaction controller.
//!
//! Every user action becomes an [`Interaction`]. The controller validates it,
//! updates the selected mode or range, and re-runs filter → aggregate for the
//! new state. A rejected interaction leaves the previous selection in place
//! and is reported through [`DashboardSnapshot::error`] so the UI can show a
//! banner instead of failing.

use chrono::NaiveDate;

use dashboard_core::date_range::DateRange;
use dashboard_core::error::ValidationError;
use dashboard_core::models::AnalysisMode;
use dashboard_data::analysis::{run_analysis, AnalysisResult};

use crate::context::DataContext;

// ── Interaction ───────────────────────────────────────────────────────────────

/// A single user action that changes what the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    SelectMode(AnalysisMode),
    SetRange { start: NaiveDate, end: NaiveDate },
    /// Go back to the full dataset bounds.
    ResetRange,
}

// ── DashboardSnapshot ─────────────────────────────────────────────────────────

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub analysis: AnalysisResult,
    /// Earliest and latest date in the daily table.
    pub bounds: DateRange,
    /// Why the most recent interaction was rejected, if it was.
    pub error: Option<ValidationError>,
    /// Startup notice, e.g. when CLI dates had to be clamped.
    pub notice: Option<String>,
    pub daily_records: usize,
    pub hourly_records: usize,
}

impl DashboardSnapshot {
    pub fn mode(&self) -> AnalysisMode {
        self.analysis.mode
    }

    pub fn range(&self) -> DateRange {
        self.analysis.range
    }

    /// Text for the warning banner, preferring the latest rejection.
    pub fn banner(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(ToString::to_string)
            .or_else(|| self.notice.clone())
    }
}

// ── DashboardController ───────────────────────────────────────────────────────

pub struct DashboardController {
    context: DataContext,
    snapshot: DashboardSnapshot,
}

impl DashboardController {
    /// Build the controller with an initial mode and optional range ends.
    ///
    /// Missing ends default to the dataset bounds. Ends outside the bounds
    /// are clamped, and an inverted pair falls back to the full bounds; both
    /// cases log a warning and set [`DashboardSnapshot::notice`].
    pub fn new(
        context: DataContext,
        mode: AnalysisMode,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        let bounds = context.bounds();
        let (range, notice) = initial_range(bounds, start, end);
        if let Some(msg) = &notice {
            tracing::warn!(%bounds, "{msg}");
        }

        let analysis = run_analysis(context.dataset(), &range, mode);
        let snapshot = DashboardSnapshot {
            analysis,
            bounds,
            error: None,
            notice,
            daily_records: context.dataset().daily().len(),
            hourly_records: context.dataset().hourly().len(),
        };

        Self { context, snapshot }
    }

    /// Apply one interaction and return the refreshed view.
    pub fn handle(&mut self, interaction: Interaction) -> &DashboardSnapshot {
        tracing::debug!(?interaction, "handling interaction");

        let bounds = self.snapshot.bounds;
        let mut mode = self.snapshot.mode();

        let range = match interaction {
            Interaction::SelectMode(next) => {
                mode = next;
                Ok(self.snapshot.range())
            }
            Interaction::SetRange { start, end } => DateRange::new(start, end)
                .and_then(|r| r.ensure_within(&bounds).map(|()| r)),
            Interaction::ResetRange => Ok(bounds),
        };

        match range {
            Ok(range) => {
                self.snapshot.analysis = run_analysis(self.context.dataset(), &range, mode);
                self.snapshot.error = None;
                tracing::debug!(
                    mode = %mode,
                    %range,
                    total = self.snapshot.analysis.total(),
                    "view refreshed"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "interaction rejected; keeping previous range");
                self.snapshot.error = Some(e);
            }
        }

        &self.snapshot
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn context(&self) -> &DataContext {
        &self.context
    }
}

/// Resolve the optional CLI range ends against `bounds`.
fn initial_range(
    bounds: DateRange,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> (DateRange, Option<String>) {
    let requested_start = start.unwrap_or(bounds.start());
    let requested_end = end.unwrap_or(bounds.end());

    let requested = match DateRange::new(requested_start, requested_end) {
        Ok(r) => r,
        Err(e) => return (bounds, Some(format!("{e}; showing the full date range"))),
    };

    let clamped = requested.clamp_to(&bounds);
    if clamped == requested {
        (requested, None)
    } else {
        (
            clamped,
            Some(format!(
                "Requested range {requested} clamped to the available data {clamped}"
            )),
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
