//! Configuration constants.
//!
//! This module defines the service endpoint defaults and the quota values
//! published for the free Mozscape access tier.

use std::time::Duration;

/// Base URL of the Mozscape API.
pub const DEFAULT_BASE_URL: &str = "http://lsapi.seomoz.com";

/// Path of the url-metrics endpoint, relative to the base URL.
pub const URL_METRICS_PATH: &str = "linkscape/url-metrics";

/// Default User-Agent header sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("moz_metrics/", env!("CARGO_PKG_VERSION"));

// Request expiry
/// Lifetime of a signed request in seconds.
///
/// The expiry is set a few minutes into the future on every call. An expiry
/// excessively far in the future is not honored by the service.
pub const EXPIRE_TIME_IN_SECONDS: u64 = 300;

// Quotas of the free access tier
// These describe the service's own limits. The core client never enforces them;
// see `client::Throttled` for an opt-in limiter that does.
/// Number of seconds to wait between two requests to stay within the free quota.
pub const WAIT_TIME_BETWEEN_REQUESTS: Duration = Duration::from_secs(10);
/// Number of URLs that can be retrieved each second.
pub const MAX_REQUESTS_PER_SECOND: u32 = 10;

/// Status value the service reports in its error envelope when the quota is exceeded.
pub const STATUS_TOO_MANY_REQUESTS: &str = "429";
