//! Error categorization.
//!
//! Maps client errors onto the [`ErrorType`] categories used for statistics.

use super::types::{ErrorType, MetricsError};

/// Categorizes a `reqwest::Error` raised while talking to the service.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::TransportTimeout
    } else if error.is_connect() {
        ErrorType::TransportConnect
    } else if error.is_body() || error.is_decode() {
        ErrorType::TransportBody
    } else {
        ErrorType::TransportOther
    }
}

/// Categorizes any [`MetricsError`].
pub fn categorize_error(error: &MetricsError) -> ErrorType {
    match error {
        MetricsError::Transport(e) => categorize_reqwest_error(e),
        MetricsError::Decode { .. } => ErrorType::DecodeError,
        MetricsError::TooManyRequests => ErrorType::TooManyRequests,
        MetricsError::Service { .. } => ErrorType::ServiceError,
    }
}
