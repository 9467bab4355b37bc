//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `moz_metrics` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use moz_metrics::initialization::init_logger_with;
use moz_metrics::{
    exit_code_for_error, run_lookup, Cli, MetricsApi, MetricsClient, ThrottleConfig, Throttled,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load MOZ_ACCESS_ID / MOZ_SECRET_KEY from .env, current directory first,
    // then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Usage errors exit with code 2
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let client = MetricsClient::with_config(cli.credentials(), cli.client_config())
        .context("Failed to create metrics client")?;
    let api: Box<dyn MetricsApi> = if cli.throttle {
        Box::new(
            Throttled::new(client, ThrottleConfig::default())
                .context("Failed to create throttled client")?,
        )
    } else {
        Box::new(client)
    };

    match run_lookup(api.as_ref(), &cli.lookup_options()).await {
        Ok(report) => {
            for metrics in &report.metrics {
                println!("{}", metrics);
            }
            for failure in &report.failures {
                eprintln!("moz_metrics error for {}: {}", failure.url, failure.error);
            }
            log::info!(
                "Retrieved metrics for {} URL(s) in {:.1}s",
                report.metrics.len(),
                report.elapsed_seconds
            );
            process::exit(report.exit_code());
        }
        Err(e) => {
            eprintln!("moz_metrics error: {}", e);
            process::exit(exit_code_for_error(&e));
        }
    }
}
