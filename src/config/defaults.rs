//! Built-in client defaults
//!
//! Hardcoded values used when the environment does not override them.

use serde::{Deserialize, Serialize};

/// Default service endpoint.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:9876/rpc";

/// Default per-attempt deadline in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default backoff schedule in milliseconds (three retries).
pub const DEFAULT_RETRY_DELAYS_MS: [u64; 3] = [1_000, 2_000, 4_000];

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    /// Parse a level name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "silent" => Some(LogLevel::Silent),
            _ => None,
        }
    }

    /// Directive for `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "off",
        }
    }
}

/// Client configuration.
///
/// Built once at startup (usually with [`ClientConfig::from_env`]) and
/// passed by reference to the client constructor.
///
/// [`ClientConfig::from_env`]: super::ClientConfig::from_env
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON-RPC endpoint URL
    pub service_url: String,

    /// Per-attempt deadline in milliseconds; 0 disables it
    pub timeout_ms: u64,

    /// Backoff before each retry, in milliseconds
    pub retry_delays_ms: Vec<u64>,

    pub log_level: LogLevel,

    /// Log every request and response through the tracing observer
    pub enable_request_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_delays_ms: DEFAULT_RETRY_DELAYS_MS.to_vec(),
            log_level: LogLevel::Info,
            enable_request_logging: false,
        }
    }
}

impl ClientConfig {
    /// Check values the environment loader does not already sanitize.
    pub fn validate(&self) -> Result<(), super::ConfigError> {
        let url = self.service_url.trim();
        if url.is_empty() {
            return Err(super::ConfigError::ValidationError(
                "service_url must not be empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(super::ConfigError::ValidationError(format!(
                "service_url must be an http(s) URL, got {:?}",
                url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.service_url, "http://localhost:9876/rpc");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.retry_delays_ms, vec![1000, 2000, 4000]);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.enable_request_logging);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" warn "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("silent"), Some(LogLevel::Silent));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_silent_disables_output() {
        assert_eq!(LogLevel::Silent.as_filter(), "off");
        assert_eq!(LogLevel::Error.as_filter(), "error");
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = ClientConfig::default();
        config.service_url = "  ".to_string();
        assert!(config.validate().is_err());

        config.service_url = "localhost:9876/rpc".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("service_url"));
    }
}
