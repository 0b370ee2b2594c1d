//! # Zone Updater
//!
//! Fetches one zone's three readings concurrently and publishes them.
//!
//! A zone is only published when all three fetches returned a non-empty body
//! and the exchange rate is usable. Otherwise nothing is written, so the gauges keep
//! their last good values until a later cycle succeeds.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::constants::KWH_PER_MWH;
use crate::error::ZoneUpdateError;
use crate::observability::metrics::grid_metrics::ZoneReading;
use crate::observability::metrics::ExporterMetrics;
use crate::sources::{GridDataSource, GridSignal};
use crate::zones::Zone;

#[derive(Debug, Deserialize)]
struct CarbonIntensityPayload {
    #[serde(rename = "carbonIntensity")]
    carbon_intensity: f64,
}

/// Carbon-free share and day-ahead price share this shape
#[derive(Debug, Deserialize)]
struct ValuePayload {
    value: f64,
}

/// Result of a single zone update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneUpdate {
    Updated(ZoneReading),
    /// Data was missing; gauges were left untouched
    Skipped,
}

/// An exchange rate of exactly zero counts as missing.
#[allow(clippy::float_cmp, reason = "Only an exact zero is rejected")]
pub fn is_usable_rate(rate: f64) -> bool {
    rate != 0.0
}

/// A 200 response with an empty body carries no reading.
///
/// `null`, `{}`, `[]`, `""`, `false` and `0` count as missing data, not as a
/// malformed payload.
#[allow(clippy::float_cmp, reason = "Only an exact zero is empty")]
pub fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Convert a EUR/MWh price to NOK/kWh
pub fn price_nok_per_kwh(price_eur_per_mwh: f64, exchange_rate: f64) -> f64 {
    (price_eur_per_mwh * exchange_rate) / KWH_PER_MWH
}

/// Fetch and publish the readings for one zone
///
/// # Errors
///
/// Returns [`ZoneUpdateError::MalformedPayload`] when all three payloads
/// arrived but one lacks its numeric field. Missing payloads are not errors.
pub async fn update_zone(
    source: &dyn GridDataSource,
    metrics: &ExporterMetrics,
    zone: &Zone,
    exchange_rate: f64,
) -> Result<ZoneUpdate, ZoneUpdateError> {
    let (carbon, renewable, price) = tokio::join!(
        source.latest(GridSignal::CarbonIntensity, zone),
        source.latest(GridSignal::CarbonFree, zone),
        source.latest(GridSignal::DayAheadPrice, zone),
    );

    let present = |payload: Option<Value>| payload.filter(|p| !is_empty_payload(p));
    let (Some(carbon), Some(renewable), Some(price)) =
        (present(carbon), present(renewable), present(price))
    else {
        warn!("Incomplete data for {}", zone.short_code);
        metrics.refresh.increment_zone_skipped(&zone.display_name);
        return Ok(ZoneUpdate::Skipped);
    };
    if !is_usable_rate(exchange_rate) {
        warn!("Incomplete data for {}: no exchange rate", zone.short_code);
        metrics.refresh.increment_zone_skipped(&zone.display_name);
        return Ok(ZoneUpdate::Skipped);
    }

    let carbon: CarbonIntensityPayload = decode(zone, GridSignal::CarbonIntensity, carbon)?;
    let renewable: ValuePayload = decode(zone, GridSignal::CarbonFree, renewable)?;
    let price: ValuePayload = decode(zone, GridSignal::DayAheadPrice, price)?;

    let reading = ZoneReading {
        carbon_intensity: carbon.carbon_intensity,
        renewable_share: renewable.value,
        price_nok_per_kwh: price_nok_per_kwh(price.value, exchange_rate),
    };
    metrics.grid.set_zone(&zone.display_name, reading);

    info!("Updated {}", zone.display_name);
    Ok(ZoneUpdate::Updated(reading))
}

fn decode<T: DeserializeOwned>(
    zone: &Zone,
    signal: GridSignal,
    payload: Value,
) -> Result<T, ZoneUpdateError> {
    serde_json::from_value(payload).map_err(|source| ZoneUpdateError::MalformedPayload {
        zone: zone.id.clone(),
        signal,
        source,
    })
}
