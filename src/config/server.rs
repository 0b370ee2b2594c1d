//! # Server Configuration
//!
//! HTTP server settings loaded from environment variables.

use super::{env_lookup, var_or_default};
use crate::constants::{
    DEFAULT_METRICS_PORT, DEFAULT_SERVER_POLL_INTERVAL_MS, DEFAULT_SERVER_STARTUP_TIMEOUT_SECS,
};

/// HTTP server configuration
///
/// All settings have defaults and can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server port for metrics and health probes
    pub metrics_port: u16,
    /// Server startup timeout (seconds)
    /// How long to wait for server to be ready before giving up
    pub startup_timeout_secs: u64,
    /// Server readiness poll interval (milliseconds)
    pub poll_interval_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            metrics_port: DEFAULT_METRICS_PORT,
            startup_timeout_secs: DEFAULT_SERVER_STARTUP_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_SERVER_POLL_INTERVAL_MS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            metrics_port: var_or_default(lookup, "METRICS_PORT", DEFAULT_METRICS_PORT),
            startup_timeout_secs: var_or_default(
                lookup,
                "SERVER_STARTUP_TIMEOUT_SECS",
                DEFAULT_SERVER_STARTUP_TIMEOUT_SECS,
            ),
            poll_interval_ms: var_or_default(
                lookup,
                "SERVER_POLL_INTERVAL_MS",
                DEFAULT_SERVER_POLL_INTERVAL_MS,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(&|_: &str| None);
        assert_eq!(config.metrics_port, 8000);
        assert_eq!(config.startup_timeout_secs, 10);
        assert_eq!(config.poll_interval_ms, 50);
    }

    #[test]
    fn test_port_override() {
        let lookup = |key: &str| (key == "METRICS_PORT").then(|| "9100".to_string());
        assert_eq!(ServerConfig::from_lookup(&lookup).metrics_port, 9100);
    }
}
