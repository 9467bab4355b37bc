//! Metric columns and the metrics entity returned by the service.

mod columns;
mod model;

// Re-export public API
pub use columns::{Column, ColumnMask};
pub use model::UrlMetrics;
