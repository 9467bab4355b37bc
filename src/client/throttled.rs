//! Quota-respecting decorator for any [`MetricsApi`].

use async_trait::async_trait;
use log::debug;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

use super::MetricsApi;
use crate::config::{ConfigValidationError, ThrottleConfig};
use crate::error_handling::{InitializationError, MetricsError};
use crate::initialization::{init_rate_limiter, RateLimiter};
use crate::metrics::{ColumnMask, UrlMetrics};

/// Wraps a [`MetricsApi`] and paces calls to stay within the service quota.
///
/// Before delegating, each call:
/// - waits until `wait_between_requests` has passed since the previous request
/// - takes one token per URL from a bucket refilled at `urls_per_second`
///
/// The wrapped client is left untouched, so the core stays free of any
/// limiting logic. Must be created inside a Tokio runtime.
pub struct Throttled<A> {
    inner: A,
    limiter: RateLimiter,
    wait_between_requests: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl<A: MetricsApi> Throttled<A> {
    /// Wraps `inner` with the given quota.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if `config` is invalid.
    pub fn new(inner: A, config: ThrottleConfig) -> Result<Self, InitializationError> {
        config.validate()?;
        let limiter = init_rate_limiter(config.urls_per_second, 0).ok_or_else(|| {
            ConfigValidationError::new("urls_per_second", "must be greater than 0")
        })?;
        Ok(Self {
            inner,
            limiter,
            wait_between_requests: config.wait_between_requests,
            last_request: Mutex::new(None),
        })
    }

    /// The wrapped client.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwraps the decorator.
    pub fn into_inner(self) -> A {
        self.inner
    }

    async fn pace(&self, urls: usize) {
        // Held across the wait so concurrent callers queue up in order
        let mut last_request = self.last_request.lock().await;
        if let Some(previous) = *last_request {
            let next = previous + self.wait_between_requests;
            if next > Instant::now() {
                debug!(
                    "Waiting {:?} before the next request",
                    next.saturating_duration_since(Instant::now())
                );
                sleep_until(next).await;
            }
        }
        self.limiter.acquire_many(urls).await;
        *last_request = Some(Instant::now());
    }
}

#[async_trait]
impl<A: MetricsApi> MetricsApi for Throttled<A> {
    async fn metrics_for_url(
        &self,
        target_url: &str,
        columns: ColumnMask,
    ) -> Result<UrlMetrics, MetricsError> {
        self.pace(1).await;
        self.inner.metrics_for_url(target_url, columns).await
    }

    async fn metrics_for_url_batch(
        &self,
        target_urls: &[String],
        columns: ColumnMask,
    ) -> Result<Vec<UrlMetrics>, MetricsError> {
        self.pace(target_urls.len()).await;
        self.inner.metrics_for_url_batch(target_urls, columns).await
    }
}
