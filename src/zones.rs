//! # Grid Zones
//!
//! Zone identifiers and their human-readable display names.
//!
//! Zones are resolved once at startup. A zone whose short code has no display
//! name is a configuration error and stops the process before it serves, so the
//! refresh loop only ever sees zones with a known label.

use crate::constants::ZONE_NAMES;
use crate::error::ConfigError;

/// A grid bidding zone resolved against the display-name table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Upstream identifier, e.g. `NO-NO1`
    pub id: String,
    /// Second segment of the identifier, e.g. `NO1`
    pub short_code: String,
    /// Value of the `zone` label on exported gauges, e.g. `Southeast-Norway`
    pub display_name: String,
}

impl Zone {
    /// Resolve a zone identifier against the built-in display-name table
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidZoneId`] if the identifier has no second
    /// segment, or [`ConfigError::UnknownZone`] if the short code is not in the table.
    pub fn resolve(id: &str) -> Result<Self, ConfigError> {
        let short_code = id
            .split('-')
            .nth(1)
            .filter(|code| !code.is_empty())
            .ok_or_else(|| ConfigError::InvalidZoneId(id.to_string()))?;

        let display_name = display_name(short_code).ok_or_else(|| ConfigError::UnknownZone {
            zone: id.to_string(),
            short_code: short_code.to_string(),
        })?;

        Ok(Self {
            id: id.to_string(),
            short_code: short_code.to_string(),
            display_name: display_name.to_string(),
        })
    }
}

/// Look up the display name for a short code
pub fn display_name(short_code: &str) -> Option<&'static str> {
    ZONE_NAMES
        .iter()
        .find(|(code, _)| *code == short_code)
        .map(|(_, name)| *name)
}

/// Resolve every configured zone, failing on the first unknown one
///
/// # Errors
///
/// Returns the first resolution error, or [`ConfigError::NoZones`] for an empty list.
pub fn resolve_zones<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Zone>, ConfigError> {
    if ids.is_empty() {
        return Err(ConfigError::NoZones);
    }
    ids.iter().map(|id| Zone::resolve(id.as_ref())).collect()
}
