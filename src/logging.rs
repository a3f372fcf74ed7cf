//! Tracing setup
//!
//! Installs a `tracing-subscriber` formatter filtered by the configured log
//! level. `RUST_LOG`, when set, takes precedence.

use tracing_subscriber::EnvFilter;

use crate::config::{ClientConfig, LogLevel};

/// Build the filter for `level`, letting `RUST_LOG` override it.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(config: &ClientConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config.log_level))
        .with_target(true)
        .try_init()
        .is_ok()
}
