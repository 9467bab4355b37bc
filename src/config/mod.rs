//! Application configuration and constants.
//!
//! This module provides:
//! - Service endpoint defaults and published quota constants
//! - Client, credential and throttle configuration types
//! - CLI option parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::Cli;
pub use constants::*;
pub use types::{
    ClientConfig, ConfigValidationError, Credentials, LogFormat, LogLevel, ThrottleConfig,
};
