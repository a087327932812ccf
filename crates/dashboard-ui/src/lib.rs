//! Terminal UI layer for the bike-sharing dashboard.
//!
//! Provides themes, the header, mode selector, date picker and metric
//! widgets, the chart and summary table views, the interactive event loop
//! built on [`ratatui`], and a headless SVG/JSON export of the current view.

pub mod app;
pub mod chart_view;
pub mod components;
pub mod export;
pub mod summary_table;
pub mod themes;

pub use dashboard_core as core;
