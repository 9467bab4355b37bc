//! Command-line options.

use std::time::Duration;

use clap::Parser;

use crate::config::constants::DEFAULT_BASE_URL;
use crate::config::types::{ClientConfig, Credentials, LogFormat, LogLevel};
use crate::metrics::{Column, ColumnMask};
use crate::run::{LookupMode, LookupOptions};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # One batch request for two URLs, credentials from the environment
/// MOZ_ACCESS_ID=member-123 MOZ_SECRET_KEY=... moz_metrics -u moz.com -u example.com
///
/// # Only Page and Domain Authority, one request per URL, paced to the free quota
/// moz_metrics -u moz.com --columns page-authority,domain-authority --single --throttle
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "moz_metrics",
    version,
    about = "Retrieves Mozscape URL metrics for one or more URLs."
)]
pub struct Cli {
    /// URL to retrieve information for (repeat for several URLs)
    #[arg(short = 'u', long = "url", required = true)]
    pub urls: Vec<String>,

    /// Mozscape AccessID
    #[arg(long, env = "MOZ_ACCESS_ID", hide_env_values = true)]
    pub access_id: String,

    /// Mozscape secret key
    #[arg(long, env = "MOZ_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Comma-separated metric columns to retrieve (default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub columns: Vec<Column>,

    /// Send one request per URL instead of a single batch
    #[arg(long)]
    pub single: bool,

    /// Pace requests to the free-tier quota (10 URLs/s, 10s between requests)
    #[arg(long)]
    pub throttle: bool,

    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub endpoint: String,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Credentials given on the command line or in the environment.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.access_id.clone(), self.secret_key.clone())
    }

    /// Client configuration derived from the options.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: self.timeout_seconds.map(Duration::from_secs),
            ..ClientConfig::default().with_base_url(self.endpoint.clone())
        }
    }

    /// Selected columns, or every column when none was given.
    pub fn column_mask(&self) -> ColumnMask {
        if self.columns.is_empty() {
            ColumnMask::all()
        } else {
            ColumnMask::from_columns(self.columns.iter().copied())
        }
    }

    /// What the run should look up.
    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions {
            urls: self.urls.clone(),
            columns: self.column_mask(),
            mode: if self.single {
                LookupMode::Single
            } else {
                LookupMode::Batch
            },
        }
    }
}
