//! # Exporter Configuration
//!
//! API key, zone list, refresh cadence and upstream endpoints.

use std::fmt;
use std::time::Duration;

use super::{env_lookup, positive_or_default};
use crate::constants::{
    API_KEY_ENV, DEFAULT_CARBON_FREE_URL, DEFAULT_CARBON_INTENSITY_URL,
    DEFAULT_EXCHANGE_RATE_URL, DEFAULT_PRICE_DAY_AHEAD_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_UPDATE_INTERVAL_SECS, DEFAULT_ZONES,
};
use crate::error::ConfigError;

/// Upstream endpoint templates
///
/// Zone endpoints take a `{zone}` placeholder; the exchange-rate endpoint takes
/// `{start}` and `{end}` dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub carbon_intensity: String,
    pub carbon_free: String,
    pub price_day_ahead: String,
    pub exchange_rate: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            carbon_intensity: DEFAULT_CARBON_INTENSITY_URL.to_string(),
            carbon_free: DEFAULT_CARBON_FREE_URL.to_string(),
            price_day_ahead: DEFAULT_PRICE_DAY_AHEAD_URL.to_string(),
            exchange_rate: DEFAULT_EXCHANGE_RATE_URL.to_string(),
        }
    }
}

/// Exporter configuration
#[derive(Clone)]
pub struct ExporterConfig {
    /// Electricity Maps API key, sent as the `auth-token` header
    pub api_key: String,
    /// Zone identifiers such as `NO-NO1`, validated at startup
    pub zones: Vec<String>,
    /// Pause between refresh cycles (seconds), never zero
    pub update_interval_secs: u64,
    /// Timeout for each upstream request (seconds)
    pub request_timeout_secs: u64,
    pub endpoints: EndpointConfig,
}

// The API key must never end up in logs.
impl fmt::Debug for ExporterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExporterConfig")
            .field("api_key", &"<redacted>")
            .field("zones", &self.zones)
            .field("update_interval_secs", &self.update_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl ExporterConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when `API_KEY_ELECTRICITYMAP` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_ENV))?;

        let zones = match lookup("EXPORTER_ZONES") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|zone| !zone.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_ZONES.iter().map(ToString::to_string).collect(),
        };

        let defaults = EndpointConfig::default();
        let endpoints = EndpointConfig {
            carbon_intensity: lookup("CARBON_INTENSITY_URL").unwrap_or(defaults.carbon_intensity),
            carbon_free: lookup("CARBON_FREE_URL").unwrap_or(defaults.carbon_free),
            price_day_ahead: lookup("PRICE_DAY_AHEAD_URL").unwrap_or(defaults.price_day_ahead),
            exchange_rate: lookup("EXCHANGE_RATE_URL").unwrap_or(defaults.exchange_rate),
        };

        Ok(Self {
            api_key,
            zones,
            update_interval_secs: positive_or_default(
                lookup,
                "UPDATE_INTERVAL_SECS",
                DEFAULT_UPDATE_INTERVAL_SECS,
            ),
            request_timeout_secs: positive_or_default(
                lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            endpoints,
        })
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
