//! Runtime layer for the bike-sharing dashboard.
//!
//! Owns the one-time data context and the controller that turns each user
//! interaction into a fresh filter → aggregate pass.

pub mod context;
pub mod controller;

pub use dashboard_core as core;
pub use dashboard_data as data;
