//! Lookup statistics tracking.
//!
//! This module provides thread-safe counters for successful lookups and for
//! failures by category.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::categorization::categorize_error;
use super::types::{ErrorType, MetricsError};

/// Thread-safe lookup statistics tracker.
///
/// All error types are initialized to zero on creation, so the struct can be
/// shared across tasks behind an `Arc` without further locking.
pub struct LookupStats {
    succeeded: AtomicUsize,
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        LookupStats {
            succeeded: AtomicUsize::new(0),
            errors,
        }
    }

    /// Records `count` URLs whose metrics were retrieved.
    pub fn record_success(&self, count: usize) {
        self.succeeded.fetch_add(count, Ordering::Relaxed);
    }

    /// Records one failed request under its category.
    pub fn record_error(&self, error: &MetricsError) {
        self.increment_error(categorize_error(error));
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                error
            );
        }
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of URLs retrieved successfully.
    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    /// Total failed requests across all categories.
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Logs a summary of non-zero failure counters.
    pub fn log_summary(&self) {
        log::info!(
            "Lookups: {} succeeded, {} failed",
            self.succeeded(),
            self.total_errors()
        );
        for error_type in ErrorType::iter() {
            let count = self.get_error_count(error_type);
            if count > 0 {
                log::info!("   {}: {}", error_type, count);
            }
        }
    }
}
