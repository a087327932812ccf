//! Shared domain layer for the bike-sharing dashboard.
//!
//! Holds the record and summary types, the error hierarchy, date-range
//! handling, number formatting and command-line settings used by every other
//! crate in the workspace.

pub mod date_range;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
