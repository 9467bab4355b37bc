//! Configuration types.
//!
//! This module defines the client configuration, credentials, throttling
//! parameters and the logging enums shared with the command-line front-end.

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, EXPIRE_TIME_IN_SECONDS, MAX_REQUESTS_PER_SECOND,
    URL_METRICS_PATH, WAIT_TIME_BETWEEN_REQUESTS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Account credentials used to sign every request.
///
/// Supplied once when the client is created and never modified afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_id: String,
    secret_key: String,
}

impl Credentials {
    /// Creates credentials from an AccessID and its secret key.
    pub fn new(access_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_id: access_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// The account identifier sent as the `AccessID` query parameter.
    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    /// The secret key used as the HMAC key. Never sent over the wire.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

// Keep the secret out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_id", &self.access_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Error returned when a configuration value is out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration for `{field}`: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what a valid value looks like
    pub message: String,
}

impl ConfigValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Library configuration for [`MetricsClient`](crate::MetricsClient).
///
/// Holds the endpoint and per-request settings so tests and callers can
/// point the client at another server.
///
/// # Examples
///
/// ```no_run
/// use moz_metrics::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig {
///     timeout: Some(Duration::from_secs(30)),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme and host of the API, without trailing path
    pub base_url: String,

    /// Path of the url-metrics endpoint
    pub metrics_path: String,

    /// Lifetime of each signed request, in seconds
    pub expire_seconds: u64,

    /// Optional per-request transport timeout (none by default)
    pub timeout: Option<Duration>,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            metrics_path: URL_METRICS_PATH.to_string(),
            expire_seconds: EXPIRE_TIME_IN_SECONDS,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Returns a copy of this configuration pointing at another base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL of the metrics endpoint, without a trailing slash.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.metrics_path.trim_matches('/')
        )
    }

    /// Checks that the configuration can produce valid requests.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigValidationError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        match url::Url::parse(&self.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigValidationError::new(
                    "base_url",
                    format!(
                        "unsupported scheme '{}', expected http or https",
                        parsed.scheme()
                    ),
                ))
            }
            Err(e) => {
                return Err(ConfigValidationError::new(
                    "base_url",
                    format!("'{}' is not a valid URL: {}", self.base_url, e),
                ))
            }
        }

        if self.metrics_path.trim_matches('/').is_empty() {
            return Err(ConfigValidationError::new(
                "metrics_path",
                "must not be empty (e.g. linkscape/url-metrics)",
            ));
        }

        if self.expire_seconds == 0 {
            return Err(ConfigValidationError::new(
                "expire_seconds",
                "must be greater than 0 (signed requests need a future expiry)",
            ));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigValidationError::new(
                "timeout",
                "must be greater than 0 when set",
            ));
        }

        Ok(())
    }
}

/// Parameters for the opt-in [`Throttled`](crate::client::Throttled) decorator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// URLs that may be looked up each second (also the bucket capacity)
    pub urls_per_second: u32,

    /// Minimum spacing between two consecutive requests
    pub wait_between_requests: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            urls_per_second: MAX_REQUESTS_PER_SECOND,
            wait_between_requests: WAIT_TIME_BETWEEN_REQUESTS,
        }
    }
}

impl ThrottleConfig {
    /// Checks that the throttle can make progress.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigValidationError`] if `urls_per_second` is zero.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.urls_per_second == 0 {
            return Err(ConfigValidationError::new(
                "urls_per_second",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://lsapi.seomoz.com");
        assert_eq!(config.metrics_path, "linkscape/url-metrics");
        assert_eq!(config.expire_seconds, 300);
        assert_eq!(config.timeout, None);
        assert!(config.user_agent.starts_with("moz_metrics/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(
            config.endpoint(),
            "http://127.0.0.1:8080/linkscape/url-metrics"
        );
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = ClientConfig::default().with_base_url("not a url");
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "base_url");

        let config = ClientConfig::default().with_base_url("ftp://example.com");
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "base_url");
        assert!(err.message.contains("ftp"));
    }

    #[test]
    fn test_validate_rejects_zero_expiry_and_timeout() {
        let config = ClientConfig {
            expire_seconds: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "expire_seconds");

        let config = ClientConfig {
            timeout: Some(Duration::ZERO),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "timeout");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("member-123", "super-secret");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("member-123"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_throttle_config_default_uses_published_quota() {
        let config = ThrottleConfig::default();
        assert_eq!(config.urls_per_second, 10);
        assert_eq!(config.wait_between_requests, Duration::from_secs(10));
        assert!(config.validate().is_ok());

        let config = ThrottleConfig {
            urls_per_second: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "urls_per_second");
    }
}
