//! Small line-oriented widgets composed by the dashboard layout.

pub mod date_picker;
pub mod header;
pub mod metric;
pub mod selector;

pub use date_picker::{DateField, DatePicker, DateSelection};
pub use header::Header;
pub use metric::Metric;
pub use selector::ModeSelector;
