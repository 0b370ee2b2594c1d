//! # Grid Metrics
//!
//! Zone gauges and exporter health. Names, help texts and label sets are
//! consumed by existing dashboards and must not change.

use prometheus::{Gauge, GaugeVec, Opts, Registry};

pub const CARBON_INTENSITY_METRIC: &str = "grid_carbon_intensity_stats";
pub const RENEWABLE_SHARE_METRIC: &str = "grid_renewable_percentage";
pub const PRICE_NOK_PER_KWH_METRIC: &str = "electricity_price_nok_per_kwh";
pub const EXPORTER_UP_METRIC: &str = "electricity_exporter_up";

/// Label carrying the zone display name
pub const ZONE_LABEL: &str = "zone";

/// One reading per zone, ready to publish
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneReading {
    /// gCO2eq/kWh
    pub carbon_intensity: f64,
    /// Percent
    pub renewable_share: f64,
    /// NOK/kWh
    pub price_nok_per_kwh: f64,
}

#[derive(Clone)]
pub struct GridMetrics {
    carbon_intensity: GaugeVec,
    renewable_share: GaugeVec,
    price_nok_per_kwh: GaugeVec,
    exporter_up: Gauge,
}

impl std::fmt::Debug for GridMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridMetrics")
            .field("exporter_up", &self.exporter_up.get())
            .finish_non_exhaustive()
    }
}

impl GridMetrics {
    pub(crate) fn new() -> prometheus::Result<Self> {
        Ok(Self {
            carbon_intensity: GaugeVec::new(
                Opts::new(CARBON_INTENSITY_METRIC, "Carbon Intensity (gCO2eq/kWh)"),
                &[ZONE_LABEL],
            )?,
            renewable_share: GaugeVec::new(
                Opts::new(RENEWABLE_SHARE_METRIC, "Renewable share (%)"),
                &[ZONE_LABEL],
            )?,
            price_nok_per_kwh: GaugeVec::new(
                Opts::new(PRICE_NOK_PER_KWH_METRIC, "Electricity price (NOK/kWh)"),
                &[ZONE_LABEL],
            )?,
            exporter_up: Gauge::new(EXPORTER_UP_METRIC, "Exporter health (1 = up, 0 = failure)")?,
        })
    }

    /// Register grid metrics with the registry
    pub(crate) fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.carbon_intensity.clone()))?;
        registry.register(Box::new(self.renewable_share.clone()))?;
        registry.register(Box::new(self.price_nok_per_kwh.clone()))?;
        registry.register(Box::new(self.exporter_up.clone()))?;
        Ok(())
    }

    /// Publish all three gauges for one zone
    pub fn set_zone(&self, display_name: &str, reading: ZoneReading) {
        self.carbon_intensity
            .with_label_values(&[display_name])
            .set(reading.carbon_intensity);
        self.renewable_share
            .with_label_values(&[display_name])
            .set(reading.renewable_share);
        self.price_nok_per_kwh
            .with_label_values(&[display_name])
            .set(reading.price_nok_per_kwh);
    }

    pub fn set_up(&self, up: bool) {
        self.exporter_up.set(if up { 1.0 } else { 0.0 });
    }

    #[cfg(test)]
    pub(crate) fn up(&self) -> f64 {
        self.exporter_up.get()
    }
}
