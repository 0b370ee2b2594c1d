//! # Configuration
//!
//! Exporter and server configuration loaded from environment variables.
//!
//! An optional `.env` file in the working directory is loaded first, so local
//! runs can keep the API key out of the shell history. Everything except the
//! API key has a default.

mod exporter;
mod server;

pub use exporter::{EndpointConfig, ExporterConfig};
pub use server::ServerConfig;

use crate::error::ConfigError;
use tracing::warn;

/// Load configuration from `.env` and the process environment
///
/// # Errors
///
/// Returns [`ConfigError::MissingApiKey`] when the API key is not set.
pub fn load_config() -> Result<(ExporterConfig, ServerConfig), ConfigError> {
    // A missing .env file is the normal case in containers
    let _ = dotenvy::dotenv();
    Ok((ExporterConfig::from_env()?, ServerConfig::from_env()))
}

/// Read a variable through `lookup`, falling back to `default` when unset or unparsable
pub(crate) fn var_or_default<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value '{}' for {}, using default {}", raw, key, default);
            default
        }),
        None => default,
    }
}

/// Like [`var_or_default`], but a zero value also falls back to `default`
pub(crate) fn positive_or_default<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match var_or_default(lookup, key, default) {
        0 => {
            warn!("Ignoring invalid value '0' for {}, using default {}", key, default);
            default
        }
        value => value,
    }
}

/// Lookup function backed by the process environment
pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_or_default_parses_value() {
        let lookup = |_: &str| Some(" 42 ".to_string());
        assert_eq!(var_or_default(&lookup, "X", 7u64), 42);
    }

    #[test]
    fn test_var_or_default_unset() {
        let lookup = |_: &str| None;
        assert_eq!(var_or_default(&lookup, "X", 7u64), 7);
    }

    #[test]
    fn test_var_or_default_invalid_falls_back() {
        let lookup = |_: &str| Some("sixty".to_string());
        assert_eq!(var_or_default(&lookup, "X", 60u64), 60);
    }

    #[test]
    fn test_positive_or_default_rejects_zero() {
        let zero = |_: &str| Some("0".to_string());
        assert_eq!(positive_or_default(&zero, "X", 60), 60);

        let five = |_: &str| Some("5".to_string());
        assert_eq!(positive_or_default(&five, "X", 60), 5);
    }
}
