//! # Error Types
//!
//! Domain errors for configuration and zone updates. Upstream transport
//! failures are not errors here: they are logged and surface as absent data.

use thiserror::Error;

use crate::sources::GridSignal;

/// Startup configuration errors. All of these abort the process before serving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingApiKey(&'static str),

    #[error("zone identifier '{0}' is not of the form <COUNTRY>-<CODE>")]
    InvalidZoneId(String),

    #[error("zone '{zone}' has short code '{short_code}' with no display name")]
    UnknownZone { zone: String, short_code: String },

    #[error("no zones configured")]
    NoZones,
}

/// Faults raised while applying a zone's readings.
///
/// Missing upstream data is not one of these; it is handled inside the updater.
#[derive(Debug, Error)]
pub enum ZoneUpdateError {
    #[error("malformed {signal} payload for zone {zone}: {source}")]
    MalformedPayload {
        zone: String,
        signal: GridSignal,
        #[source]
        source: serde_json::Error,
    },
}

/// Unexpected shape of the Norges Bank SDMX-JSON response
#[derive(Debug, Error)]
pub enum ExchangeRateError {
    #[error("response does not match the SDMX-JSON layout: {0}")]
    Layout(#[from] serde_json::Error),

    #[error("response contains no data sets")]
    NoDataSet,

    #[error("series '{0}' missing from data set")]
    MissingSeries(&'static str),

    #[error("series has no observations")]
    NoObservations,

    #[error("observation {date} has no value")]
    EmptyObservation { date: String },

    #[error("observation {date} has non-numeric value {value}")]
    NonNumeric { date: String, value: serde_json::Value },
}
