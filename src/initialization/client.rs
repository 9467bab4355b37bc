//! HTTP client initialization.

use reqwest::ClientBuilder;

use crate::config::ClientConfig;

/// Initializes the HTTP client used for metrics requests.
///
/// Creates a `reqwest::Client` configured with the User-Agent from `config`
/// and, only when one is set, a per-request timeout. Without a timeout the
/// transport defaults apply.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &ClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = ClientBuilder::new().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
