//! Metrics API client.
//!
//! This module provides:
//! - The [`MetricsApi`] trait implemented by the client and its decorators
//! - [`MetricsClient`], which signs and sends single and batch lookups
//! - Response classification for the batch endpoint
//! - [`Throttled`], an opt-in decorator that applies the service quota

mod metrics_client;
mod request;
mod response;
mod throttled;

use async_trait::async_trait;

use crate::error_handling::MetricsError;
use crate::metrics::{ColumnMask, UrlMetrics};

// Re-export public API
pub use metrics_client::MetricsClient;
pub use response::{decode_batch, decode_single, BatchResponse};
pub use throttled::Throttled;

/// Operations offered by the url-metrics service.
#[async_trait]
pub trait MetricsApi: Send + Sync {
    /// Retrieves metrics for exactly one URL.
    async fn metrics_for_url(
        &self,
        target_url: &str,
        columns: ColumnMask,
    ) -> Result<UrlMetrics, MetricsError>;

    /// Retrieves metrics for several URLs in one round trip.
    ///
    /// Results are returned in the order the service sent them and are
    /// assumed to follow the input order. Entries are not correlated with the
    /// input URLs, so a partial or reordered response goes undetected.
    async fn metrics_for_url_batch(
        &self,
        target_urls: &[String],
        columns: ColumnMask,
    ) -> Result<Vec<UrlMetrics>, MetricsError>;
}
