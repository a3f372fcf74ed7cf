//! Client configuration
//!
//! Two layers:
//! 1. Built-in defaults
//! 2. `CDS_*` environment variables

mod defaults;
mod env;

pub use defaults::{
    ClientConfig, LogLevel, DEFAULT_RETRY_DELAYS_MS, DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT_MS,
};
pub use env::{
    parse_retry_delays, parse_timeout, ENV_ENABLE_REQUEST_LOGGING, ENV_LOG_LEVEL,
    ENV_LOG_LEVEL_FALLBACK, ENV_RETRY_DELAYS_MS, ENV_SERVICE_URL, ENV_TIMEOUT_MS,
};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}
