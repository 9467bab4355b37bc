// Shared test helpers for mock server setup and signed-request checks.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::HashMap;

use chrono::Utc;
use wiremock::{MockServer, Request};

use moz_metrics::signer::sign;
use moz_metrics::{ClientConfig, Credentials, MetricsClient};

pub const ACCESS_ID: &str = "member-123";
pub const SECRET_KEY: &str = "secret";
pub const METRICS_PATH: &str = "/linkscape/url-metrics";

/// Creates a client that talks to the given mock server.
pub fn client_for(server: &MockServer) -> MetricsClient {
    let config = ClientConfig::default().with_base_url(server.uri());
    MetricsClient::with_config(Credentials::new(ACCESS_ID, SECRET_KEY), config)
        .expect("Failed to create metrics client")
}

/// Decoded query parameters of a received request.
pub fn query_params(request: &Request) -> HashMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

/// Asserts the request carries a fresh, valid signature for the test credentials.
#[allow(dead_code)] // Used by other test files
pub fn assert_signed(request: &Request) {
    let params = query_params(request);
    assert_eq!(params.get("AccessID").map(String::as_str), Some(ACCESS_ID));

    let expires: i64 = params
        .get("Expires")
        .expect("Expires parameter missing")
        .parse()
        .expect("Expires is not an integer");
    let now = Utc::now().timestamp();
    assert!(
        expires > now && expires <= now + 301,
        "expires {} not within 300s of {}",
        expires,
        now
    );

    let signature = params.get("Signature").expect("Signature parameter missing");
    assert_eq!(
        urlencoding::encode(signature),
        sign(ACCESS_ID, SECRET_KEY, expires),
        "signature does not match HMAC of AccessID and Expires"
    );
}
