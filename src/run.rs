//! Lookup orchestration used by the command-line front-end.
//!
//! Runs either one batch request for every URL or one request per URL, and
//! maps the outcome to a process exit code.

use std::time::Instant;

use log::{info, warn};

use crate::client::MetricsApi;
use crate::error_handling::{LookupStats, MetricsError};
use crate::metrics::{ColumnMask, UrlMetrics};

/// Exit code for a run where every lookup succeeded.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for transport, decode and service failures.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code used when the service reports that the quota is exhausted.
pub const EXIT_QUOTA_EXCEEDED: i32 = 3;

/// How URLs are sent to the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupMode {
    /// One POST carrying every URL
    Batch,
    /// One GET per URL, in input order
    Single,
}

/// What to look up.
#[derive(Debug, Clone)]
pub struct LookupOptions {
    /// Target URLs, in the order they were given
    pub urls: Vec<String>,
    /// Columns to request
    pub columns: ColumnMask,
    /// Batch or per-URL requests
    pub mode: LookupMode,
}

/// A URL whose lookup failed in single mode.
#[derive(Debug)]
pub struct LookupFailure {
    /// The URL that was requested
    pub url: String,
    /// Why it failed
    pub error: MetricsError,
}

/// Results of a lookup run.
#[derive(Debug)]
pub struct LookupReport {
    /// Metrics in service order (batch) or input order (single)
    pub metrics: Vec<UrlMetrics>,
    /// Per-URL failures (single mode only)
    pub failures: Vec<LookupFailure>,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}

impl LookupReport {
    /// Exit code summarizing the run.
    pub fn exit_code(&self) -> i32 {
        if self.failures.iter().any(|f| f.error.is_quota_exceeded()) {
            EXIT_QUOTA_EXCEEDED
        } else if !self.failures.is_empty() {
            EXIT_FAILURE
        } else {
            EXIT_SUCCESS
        }
    }
}

/// Exit code for a run that failed as a whole.
pub fn exit_code_for_error(error: &MetricsError) -> i32 {
    if error.is_quota_exceeded() {
        EXIT_QUOTA_EXCEEDED
    } else {
        EXIT_FAILURE
    }
}

/// Runs the lookups described by `options` against `api`.
///
/// In batch mode a failed request fails the whole run. In single mode each
/// failure is recorded and the run continues, except after a quota error,
/// where the remaining URLs are skipped. [`MetricsClient`](crate::MetricsClient)
/// never reports a quota error for single lookups, so that stop only applies
/// to other [`MetricsApi`] implementations.
///
/// # Errors
///
/// Returns the batch request's error in batch mode. Single mode never fails
/// as a whole.
pub async fn run_lookup<A>(api: &A, options: &LookupOptions) -> Result<LookupReport, MetricsError>
where
    A: MetricsApi + ?Sized,
{
    let start = Instant::now();
    let stats = LookupStats::new();

    let (metrics, failures) = match options.mode {
        LookupMode::Batch => {
            info!("Looking up {} URL(s) in one batch", options.urls.len());
            match api
                .metrics_for_url_batch(&options.urls, options.columns)
                .await
            {
                Ok(metrics) => {
                    stats.record_success(metrics.len());
                    (metrics, Vec::new())
                }
                Err(e) => {
                    stats.record_error(&e);
                    stats.log_summary();
                    return Err(e);
                }
            }
        }
        LookupMode::Single => {
            info!("Looking up {} URL(s) one at a time", options.urls.len());
            let mut metrics = Vec::with_capacity(options.urls.len());
            let mut failures = Vec::new();
            for url in &options.urls {
                match api.metrics_for_url(url, options.columns).await {
                    Ok(m) => {
                        stats.record_success(1);
                        metrics.push(m);
                    }
                    Err(error) => {
                        stats.record_error(&error);
                        warn!("Lookup failed for {}: {}", url, error);
                        let quota_exceeded = error.is_quota_exceeded();
                        failures.push(LookupFailure {
                            url: url.clone(),
                            error,
                        });
                        if quota_exceeded {
                            warn!("Quota exceeded; skipping the remaining URLs");
                            break;
                        }
                    }
                }
            }
            (metrics, failures)
        }
    };

    stats.log_summary();
    Ok(LookupReport {
        metrics,
        failures,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays canned single-lookup results and records the URLs it saw.
    struct ScriptedApi {
        single: Mutex<Vec<Result<UrlMetrics, MetricsError>>>,
        batch_quota_exceeded: bool,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedApi {
        fn new(single: Vec<Result<UrlMetrics, MetricsError>>) -> Self {
            Self {
                single: Mutex::new(single.into_iter().rev().collect()),
                batch_quota_exceeded: false,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MetricsApi for ScriptedApi {
        async fn metrics_for_url(
            &self,
            target_url: &str,
            _columns: ColumnMask,
        ) -> Result<UrlMetrics, MetricsError> {
            self.seen.lock().unwrap().push(target_url.to_string());
            self.single
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(UrlMetrics::default()))
        }

        async fn metrics_for_url_batch(
            &self,
            target_urls: &[String],
            _columns: ColumnMask,
        ) -> Result<Vec<UrlMetrics>, MetricsError> {
            if self.batch_quota_exceeded {
                return Err(MetricsError::TooManyRequests);
            }
            self.seen.lock().unwrap().extend(target_urls.iter().cloned());
            Ok(target_urls.iter().map(|_| UrlMetrics::default()).collect())
        }
    }

    fn options(mode: LookupMode, urls: &[&str]) -> LookupOptions {
        LookupOptions {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            columns: ColumnMask::all(),
            mode,
        }
    }

    #[tokio::test]
    async fn test_batch_mode_sends_every_url_once() {
        let api = ScriptedApi::new(Vec::new());
        let report = run_lookup(&api, &options(LookupMode::Batch, &["a.com", "b.com"]))
            .await
            .unwrap();
        assert_eq!(report.metrics.len(), 2);
        assert_eq!(report.exit_code(), EXIT_SUCCESS);
        assert_eq!(*api.seen.lock().unwrap(), vec!["a.com", "b.com"]);
    }

    #[tokio::test]
    async fn test_batch_mode_propagates_quota_error() {
        let mut api = ScriptedApi::new(Vec::new());
        api.batch_quota_exceeded = true;
        let err = run_lookup(&api, &options(LookupMode::Batch, &["a.com"]))
            .await
            .unwrap_err();
        assert_eq!(exit_code_for_error(&err), EXIT_QUOTA_EXCEEDED);
    }

    #[tokio::test]
    async fn test_single_mode_continues_after_service_error() {
        let api = ScriptedApi::new(vec![
            Err(MetricsError::Service {
                status: "500".to_string(),
                message: "internal error".to_string(),
            }),
            Ok(UrlMetrics {
                canonical_url: "b.com/".to_string(),
                ..Default::default()
            }),
        ]);
        let report = run_lookup(&api, &options(LookupMode::Single, &["a.com", "b.com"]))
            .await
            .unwrap();
        assert_eq!(report.metrics.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].url, "a.com");
        assert_eq!(report.exit_code(), EXIT_FAILURE);
    }

    #[tokio::test]
    async fn test_single_mode_stops_on_quota_error() {
        let api = ScriptedApi::new(vec![
            Ok(UrlMetrics::default()),
            Err(MetricsError::TooManyRequests),
        ]);
        let report = run_lookup(
            &api,
            &options(LookupMode::Single, &["a.com", "b.com", "c.com"]),
        )
        .await
        .unwrap();
        assert_eq!(report.metrics.len(), 1);
        assert_eq!(report.exit_code(), EXIT_QUOTA_EXCEEDED);
        assert_eq!(*api.seen.lock().unwrap(), vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_exit_code_for_error() {
        assert_eq!(
            exit_code_for_error(&MetricsError::TooManyRequests),
            EXIT_QUOTA_EXCEEDED
        );
        assert_eq!(
            exit_code_for_error(&MetricsError::Service {
                status: "401".to_string(),
                message: String::new(),
            }),
            EXIT_FAILURE
        );
    }
}
