//! Response decoding and classification.
//!
//! The service reports application-level errors inside a 200-class body, so
//! the batch endpoint's result is classified by JSON shape alone:
//!
//! 1. an array of metrics objects is a success
//! 2. otherwise an object of string fields is an error envelope:
//!    `status == "429"` means the quota is exhausted, any other `status` is a
//!    service error, and an envelope without `status` is reported with the
//!    array decode error
//! 3. anything else is undecodable

use std::collections::HashMap;

use log::debug;

use crate::config::STATUS_TOO_MANY_REQUESTS;
use crate::error_handling::MetricsError;
use crate::metrics::UrlMetrics;

/// Decodes the body of a single-URL lookup.
///
/// No envelope classification happens here: anything that is not a metrics
/// object is a decode error.
pub fn decode_single(body: &[u8]) -> Result<UrlMetrics, MetricsError> {
    serde_json::from_slice(body).map_err(|e| MetricsError::decode(e, body))
}

/// Shape of a batch response body.
#[derive(Debug)]
pub enum BatchResponse {
    /// Array of metrics objects, in the order the service returned them
    Metrics(Vec<UrlMetrics>),
    /// Error envelope with `status == "429"`
    QuotaExceeded,
    /// Error envelope with any other `status`
    ServiceError {
        /// Envelope `status`
        status: String,
        /// Envelope `message`, empty when absent
        message: String,
    },
    /// Object of strings without a `status` key; carries the array decode error
    EnvelopeWithoutStatus(serde_json::Error),
    /// Neither an array of metrics nor an object of strings; carries the envelope decode error
    Undecodable(serde_json::Error),
}

impl BatchResponse {
    /// Classifies a raw batch response body.
    pub fn classify(body: &[u8]) -> Self {
        // JSON `null` decodes as an empty result
        let array_error = match serde_json::from_slice::<Option<Vec<UrlMetrics>>>(body) {
            Ok(metrics) => return BatchResponse::Metrics(metrics.unwrap_or_default()),
            Err(e) => e,
        };

        // A `null` value counts as an empty string; the key itself stays present
        let mut envelope: HashMap<String, Option<String>> = match serde_json::from_slice(body) {
            Ok(envelope) => envelope,
            Err(e) => return BatchResponse::Undecodable(e),
        };

        match envelope.remove("status").map(Option::unwrap_or_default) {
            Some(status) if status == STATUS_TOO_MANY_REQUESTS => BatchResponse::QuotaExceeded,
            Some(status) => BatchResponse::ServiceError {
                status,
                message: envelope.remove("message").flatten().unwrap_or_default(),
            },
            None => BatchResponse::EnvelopeWithoutStatus(array_error),
        }
    }

    /// Converts the classification into the client's result type.
    ///
    /// `body` is folded into decode errors so callers can inspect it.
    pub fn into_result(self, body: &[u8]) -> Result<Vec<UrlMetrics>, MetricsError> {
        match self {
            BatchResponse::Metrics(metrics) => Ok(metrics),
            BatchResponse::QuotaExceeded => Err(MetricsError::TooManyRequests),
            BatchResponse::ServiceError { status, message } => {
                Err(MetricsError::Service { status, message })
            }
            BatchResponse::EnvelopeWithoutStatus(e) => Err(MetricsError::decode(e, body)),
            BatchResponse::Undecodable(e) => {
                debug!(
                    "Unrecognized batch response body: {}",
                    String::from_utf8_lossy(body)
                );
                Err(MetricsError::decode(e, body))
            }
        }
    }
}

/// Classifies a batch body and returns metrics or the matching error.
pub fn decode_batch(body: &[u8]) -> Result<Vec<UrlMetrics>, MetricsError> {
    BatchResponse::classify(body).into_result(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_array_of_metrics() {
        let metrics = decode_batch(br#"[{"uu":"http://a.com","pda":42.5}]"#).unwrap();
        assert_eq!(
            metrics,
            vec![UrlMetrics {
                canonical_url: "http://a.com".to_string(),
                domain_authority: 42.5,
                ..Default::default()
            }]
        );
    }

    #[test]
    fn test_batch_quota_exceeded() {
        let err = decode_batch(br#"{"status":"429","message":"quota exceeded"}"#).unwrap_err();
        assert!(matches!(err, MetricsError::TooManyRequests));
    }

    #[test]
    fn test_batch_service_error() {
        let err = decode_batch(br#"{"status":"500","message":"internal error"}"#).unwrap_err();
        match err {
            MetricsError::Service { status, message } => {
                assert_eq!(status, "500");
                assert_eq!(message, "internal error");
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_service_error_without_message() {
        let err = decode_batch(br#"{"status":"401"}"#).unwrap_err();
        match err {
            MetricsError::Service { status, message } => {
                assert_eq!(status, "401");
                assert_eq!(message, "");
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_envelope_without_status_reports_array_error() {
        let body = br#"{"message":"no status field"}"#;

        match BatchResponse::classify(body) {
            BatchResponse::EnvelopeWithoutStatus(e) => {
                assert!(e.to_string().contains("expected a sequence"), "{}", e)
            }
            other => panic!("expected envelope without status, got {:?}", other),
        }

        let err = decode_batch(body).unwrap_err();
        assert!(matches!(err, MetricsError::Decode { .. }));
        assert!(err.to_string().contains("expected a sequence"));
        assert_eq!(err.body(), Some(r#"{"message":"no status field"}"#));
    }

    #[test]
    fn test_batch_not_json_is_decode_error_with_body() {
        let err = decode_batch(b"not json at all").unwrap_err();
        assert!(matches!(err, MetricsError::Decode { .. }));
        assert_eq!(err.body(), Some("not json at all"));
    }

    #[test]
    fn test_batch_null_fields_decode_as_absent() {
        let metrics = decode_batch(br#"[{"uu":"a.com/","ut":null,"pda":null}]"#).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].canonical_url, "a.com/");
        assert_eq!(metrics[0].title, "");
        assert_eq!(metrics[0].domain_authority, 0.0);
    }

    #[test]
    fn test_batch_quota_envelope_with_null_message() {
        let err = decode_batch(br#"{"status":"429","message":null}"#).unwrap_err();
        assert!(matches!(err, MetricsError::TooManyRequests));
    }

    #[test]
    fn test_batch_envelope_with_null_status_is_service_error() {
        let err = decode_batch(br#"{"status":null,"message":"oops"}"#).unwrap_err();
        match err {
            MetricsError::Service { status, message } => {
                assert_eq!(status, "");
                assert_eq!(message, "oops");
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_envelope_with_non_string_values_is_undecodable() {
        let body = br#"{"status":429,"message":"quota exceeded"}"#;
        assert!(matches!(
            BatchResponse::classify(body),
            BatchResponse::Undecodable(_)
        ));
    }

    #[test]
    fn test_batch_empty_array_and_null() {
        assert!(decode_batch(b"[]").unwrap().is_empty());
        assert!(decode_batch(b"null").unwrap().is_empty());
    }

    #[test]
    fn test_batch_preserves_response_order() {
        let body = br#"[{"uu":"c.com/"},{"uu":"a.com/"},{},{"uu":"b.com/"}]"#;
        let urls: Vec<String> = decode_batch(body)
            .unwrap()
            .into_iter()
            .map(|m| m.canonical_url)
            .collect();
        assert_eq!(urls, vec!["c.com/", "a.com/", "", "b.com/"]);
    }

    #[test]
    fn test_single_decodes_object() {
        let metrics = decode_single(br#"{"uu":"moz.com/","upa":72.0}"#).unwrap();
        assert_eq!(metrics.canonical_url, "moz.com/");
        assert_eq!(metrics.page_authority, 72.0);
    }

    #[test]
    fn test_single_null_fields_decode_as_absent() {
        let metrics = decode_single(br#"{"uu":"a.com/","ut":null}"#).unwrap();
        assert_eq!(metrics.canonical_url, "a.com/");
        assert_eq!(metrics.title, "");
    }

    #[test]
    fn test_single_does_not_classify_envelopes() {
        // A 429 envelope decodes as an object with no known fields on this path
        let metrics = decode_single(br#"{"status":"429","message":"quota exceeded"}"#).unwrap();
        assert_eq!(metrics, UrlMetrics::default());

        let err = decode_single(b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, MetricsError::Decode { .. }));
    }
}
