//! Error handling and lookup statistics.
//!
//! This module provides:
//! - The closed [`MetricsError`] taxonomy returned by the client
//! - Initialization errors for logger and HTTP client setup
//! - Error categorization and per-category failure counters

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_error, categorize_reqwest_error};
pub use stats::LookupStats;
pub use types::{ErrorType, InitializationError, MetricsError};
