//! moz_metrics library: signed client for the Mozscape URL-metrics service
//!
//! This library retrieves link and authority metrics (Page Authority, Domain
//! Authority, MozRank, link counts, ...) for one URL or a batch of URLs.
//! Every request is authenticated with an expiring HMAC-SHA1 signature derived
//! from the account's AccessID and secret key.
//!
//! # Example
//!
//! ```no_run
//! use moz_metrics::{ColumnMask, MetricsApi, MetricsClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MetricsClient::new("member-123", "secret")?;
//! let cols = ColumnMask::CANONICAL_URL | ColumnMask::DOMAIN_AUTHORITY;
//!
//! let metrics = client.metrics_for_url("moz.com", cols).await?;
//! println!("{}", metrics);
//!
//! let batch = client
//!     .metrics_for_url_batch(&["moz.com".to_string(), "example.com".to_string()], cols)
//!     .await?;
//! println!("{} results", batch.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod metrics;
pub mod run;
pub mod signer;

// Re-export public API
pub use client::{BatchResponse, MetricsApi, MetricsClient, Throttled};
pub use config::{Cli, ClientConfig, Credentials, LogFormat, LogLevel, ThrottleConfig};
pub use error_handling::{InitializationError, MetricsError};
pub use metrics::{Column, ColumnMask, UrlMetrics};
pub use run::{exit_code_for_error, run_lookup, LookupMode, LookupOptions, LookupReport};
