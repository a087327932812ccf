//! Data layer for the bike-sharing dashboard.
//!
//! Reads the daily and hourly CSV tables, filters the daily table by date
//! range, aggregates it per analysis mode and packages the result for the
//! presentation layer.

pub mod aggregator;
pub mod analysis;
pub mod dataset;
pub mod filter;
pub mod reader;

pub use dashboard_core as core;
