//! The url-metrics HTTP client.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::request::{batch_url, single_url};
use super::response::{decode_batch, decode_single};
use super::MetricsApi;
use crate::config::{ClientConfig, Credentials};
use crate::error_handling::{InitializationError, MetricsError};
use crate::initialization::init_client;
use crate::metrics::{ColumnMask, UrlMetrics};
use crate::signer::SignedAuth;

/// Client for the url-metrics endpoint.
///
/// Holds the credentials and configuration, both immutable after
/// construction, and a pooled `reqwest::Client`. Cloning is cheap and clones
/// share the connection pool, so one instance can serve concurrent callers.
///
/// Each call mints a fresh expiry and signature and performs exactly one HTTP
/// request. There is no retry, caching or rate limiting here; wrap the
/// client in [`Throttled`](super::Throttled) to respect the service quota.
///
/// # Example
///
/// ```no_run
/// use moz_metrics::{ColumnMask, MetricsApi, MetricsClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MetricsClient::new("member-123", "secret")?;
/// let cols = ColumnMask::CANONICAL_URL | ColumnMask::DOMAIN_AUTHORITY;
/// let metrics = client.metrics_for_url("moz.com", cols).await?;
/// println!("{}", metrics);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct MetricsClient {
    credentials: Arc<Credentials>,
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl MetricsClient {
    /// Creates a client for the public endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the HTTP client cannot be built.
    pub fn new(
        access_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, InitializationError> {
        Self::with_config(
            Credentials::new(access_id, secret_key),
            ClientConfig::default(),
        )
    }

    /// Creates a client with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn with_config(
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self, InitializationError> {
        config.validate()?;
        let http = init_client(&config)?;
        Ok(Self {
            credentials: Arc::new(credentials),
            config: Arc::new(config),
            http,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The AccessID requests are signed for.
    pub fn access_id(&self) -> &str {
        self.credentials.access_id()
    }

    fn sign(&self) -> SignedAuth {
        SignedAuth::mint(&self.credentials, self.config.expire_seconds)
    }
}

#[async_trait]
impl MetricsApi for MetricsClient {
    async fn metrics_for_url(
        &self,
        target_url: &str,
        columns: ColumnMask,
    ) -> Result<UrlMetrics, MetricsError> {
        let auth = self.sign();
        let request_url = single_url(
            &self.config.endpoint(),
            target_url,
            columns,
            self.credentials.access_id(),
            &auth,
        );

        debug!(
            "Requesting metrics for {} (cols={}, expires={})",
            target_url, columns, auth.expires
        );
        let response = self.http.get(&request_url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("Received {} bytes (HTTP {})", body.len(), status);

        decode_single(&body)
    }

    async fn metrics_for_url_batch(
        &self,
        target_urls: &[String],
        columns: ColumnMask,
    ) -> Result<Vec<UrlMetrics>, MetricsError> {
        let auth = self.sign();
        let request_url = batch_url(
            &self.config.endpoint(),
            columns,
            self.credentials.access_id(),
            &auth,
        );

        debug!(
            "Requesting metrics for {} URL(s) in one batch (cols={}, expires={})",
            target_urls.len(),
            columns,
            auth.expires
        );
        let response = self
            .http
            .post(&request_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(target_urls)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("Received {} bytes (HTTP {})", body.len(), status);

        // Results are trusted to follow the input order; the service returns
        // no URL to correlate entries with.
        let metrics = decode_batch(&body)?;
        if metrics.len() != target_urls.len() {
            debug!(
                "Batch returned {} entries for {} URL(s)",
                metrics.len(),
                target_urls.len()
            );
        }
        Ok(metrics)
    }
}
