//! Error type definitions.
//!
//! This module defines the errors returned by the metrics client and by
//! application setup, plus the categories used for failure statistics.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Errors returned by the metrics client operations.
///
/// The set is closed so callers can branch exhaustively, e.g. back off on
/// [`MetricsError::TooManyRequests`] without inspecting message text.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Connection, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] ReqwestError),

    /// The response body matched none of the expected shapes.
    ///
    /// `body` holds the raw response so callers decide whether to surface it.
    #[error("failed to decode response: {source}")]
    Decode {
        /// Underlying parse failure
        #[source]
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// The service reported that the request quota is exhausted.
    #[error("too many requests: the service quota has been exceeded")]
    TooManyRequests,

    /// Any other error reported by the service in its error envelope.
    #[error("service error: status {status}, message: {message}")]
    Service {
        /// Value of the envelope's `status` field
        status: String,
        /// Value of the envelope's `message` field, empty when absent
        message: String,
    },
}

impl MetricsError {
    pub(crate) fn decode(source: serde_json::Error, body: &[u8]) -> Self {
        MetricsError::Decode {
            source,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// True when the service asked the caller to slow down.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, MetricsError::TooManyRequests)
    }

    /// Raw response body for decode failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            MetricsError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Invalid client or throttle configuration.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigValidationError),
}

/// Failure categories tracked in lookup statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Transport errors
    /// Request timed out
    TransportTimeout,
    /// Connection could not be established
    TransportConnect,
    /// Response body could not be read
    TransportBody,
    /// Any other transport failure
    TransportOther,
    // Response errors
    /// Body matched no known shape
    DecodeError,
    /// Quota envelope
    TooManyRequests,
    /// Any other error envelope
    ServiceError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::TransportTimeout => "Transport timeout",
            ErrorType::TransportConnect => "Transport connect error",
            ErrorType::TransportBody => "Transport body error",
            ErrorType::TransportOther => "Transport error",
            ErrorType::DecodeError => "Response decode error",
            ErrorType::TooManyRequests => "Too many requests (429)",
            ErrorType::ServiceError => "Service error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_type_as_str() {
        assert_eq!(ErrorType::TransportTimeout.as_str(), "Transport timeout");
        assert_eq!(
            ErrorType::TooManyRequests.as_str(),
            "Too many requests (429)"
        );
        assert_eq!(ErrorType::ServiceError.to_string(), "Service error");
    }

    #[test]
    fn test_all_error_types_have_string_representation() {
        for error_type in ErrorType::iter() {
            assert!(!error_type.as_str().is_empty());
        }
    }

    #[test]
    fn test_service_error_message_combines_fields() {
        let err = MetricsError::Service {
            status: "500".to_string(),
            message: "internal error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "service error: status 500, message: internal error"
        );
        assert!(!err.is_quota_exceeded());
        assert_eq!(err.body(), None);
    }

    #[test]
    fn test_decode_error_keeps_raw_body() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = MetricsError::decode(source, b"not json");
        assert_eq!(err.body(), Some("not json"));
        assert!(err.to_string().starts_with("failed to decode response"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_too_many_requests_is_quota_exceeded() {
        assert!(MetricsError::TooManyRequests.is_quota_exceeded());
    }
}
