//! Environment loading
//!
//! Reads client settings from `CDS_*` environment variables. Bad values fall
//! back to the built-in defaults with a warning instead of failing.

use super::defaults::{
    ClientConfig, LogLevel, DEFAULT_RETRY_DELAYS_MS, DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT_MS,
};

pub const ENV_SERVICE_URL: &str = "CDS_INDEX_SERVICE_URL";
pub const ENV_TIMEOUT_MS: &str = "CDS_REQUEST_TIMEOUT_MS";
pub const ENV_RETRY_DELAYS_MS: &str = "CDS_RETRY_DELAYS_MS";
pub const ENV_LOG_LEVEL: &str = "CDS_LOG_LEVEL";
/// Consulted when `CDS_LOG_LEVEL` is unset.
pub const ENV_LOG_LEVEL_FALLBACK: &str = "LOG_LEVEL";
pub const ENV_ENABLE_REQUEST_LOGGING: &str = "CDS_ENABLE_REQUEST_LOGGING";

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(ENV_LOG_LEVEL)
            .or_else(|| lookup(ENV_LOG_LEVEL_FALLBACK))
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or_default();

        Self {
            service_url: lookup(ENV_SERVICE_URL).unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
            timeout_ms: parse_timeout(lookup(ENV_TIMEOUT_MS).as_deref()),
            retry_delays_ms: parse_retry_delays(lookup(ENV_RETRY_DELAYS_MS).as_deref()),
            log_level,
            enable_request_logging: lookup(ENV_ENABLE_REQUEST_LOGGING).as_deref() == Some("true"),
        }
    }
}

/// Parse a timeout in milliseconds. Missing, unparseable or zero values use
/// the default.
pub fn parse_timeout(value: Option<&str>) -> u64 {
    match value.map(str::trim).map(str::parse::<u64>) {
        Some(Ok(ms)) if ms > 0 => ms,
        Some(_) => {
            tracing::warn!(value = ?value, "invalid request timeout, using default");
            DEFAULT_TIMEOUT_MS
        }
        None => DEFAULT_TIMEOUT_MS,
    }
}

/// Parse a comma-separated list of non-negative delays in milliseconds.
///
/// Any bad entry rejects the whole list.
pub fn parse_retry_delays(value: Option<&str>) -> Vec<u64> {
    let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
        return DEFAULT_RETRY_DELAYS_MS.to_vec();
    };

    let parsed: Result<Vec<u64>, _> = raw.split(',').map(|s| s.trim().parse::<u64>()).collect();
    match parsed {
        Ok(delays) => delays,
        Err(e) => {
            tracing::warn!(value = raw, error = %e, "invalid retry delays, using defaults");
            DEFAULT_RETRY_DELAYS_MS.to_vec()
        }
    }
}
