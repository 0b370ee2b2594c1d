//! In-memory sources for driving the updater and the refresh loop in tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::observability::metrics::grid_metrics::ZoneReading;
use crate::observability::metrics::ExporterMetrics;
use crate::sources::{ExchangeRateSource, GridDataSource, GridSignal};
use crate::zones::Zone;

/// Grid source answering from a mutable table; missing entries are fetch failures
#[derive(Debug, Default)]
pub(crate) struct FakeGrid {
    payloads: Mutex<HashMap<(String, GridSignal), Value>>,
    calls: AtomicUsize,
    panic_on: Mutex<Option<String>>,
    stalled: AtomicBool,
}

impl FakeGrid {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&self, zone: &str, signal: GridSignal, payload: Value) {
        self.payloads
            .lock()
            .unwrap()
            .insert((zone.to_string(), signal), payload);
    }

    pub(crate) fn set_zone(&self, zone: &str, carbon: f64, renewable: f64, price_eur: f64) {
        self.set(zone, GridSignal::CarbonIntensity, json!({ "zone": zone, "carbonIntensity": carbon }));
        self.set(zone, GridSignal::CarbonFree, json!({ "zone": zone, "value": renewable }));
        self.set(zone, GridSignal::DayAheadPrice, json!({ "zone": zone, "value": price_eur, "unit": "EUR/MWh" }));
    }

    pub(crate) fn remove(&self, zone: &str, signal: GridSignal) {
        self.payloads
            .lock()
            .unwrap()
            .remove(&(zone.to_string(), signal));
    }

    pub(crate) fn panic_on(&self, zone: &str) {
        *self.panic_on.lock().unwrap() = Some(zone.to_string());
    }

    pub(crate) fn clear_panic(&self) {
        *self.panic_on.lock().unwrap() = None;
    }

    /// Every later fetch hangs until its future is dropped
    pub(crate) fn stall(&self) {
        self.stalled.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GridDataSource for FakeGrid {
    async fn latest(&self, signal: GridSignal, zone: &Zone) -> Option<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let should_panic = self.panic_on.lock().unwrap().as_deref() == Some(zone.id.as_str());
        if should_panic {
            panic!("fake grid source failure for {}", zone.id);
        }
        if self.stalled.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.payloads
            .lock()
            .unwrap()
            .get(&(zone.id.clone(), signal))
            .cloned()
    }
}

/// Exchange-rate source returning a scripted sequence; the last entry repeats
#[derive(Debug)]
pub(crate) struct FakeExchange {
    rates: Vec<Option<f64>>,
    calls: AtomicUsize,
}

impl FakeExchange {
    pub(crate) fn new(rates: Vec<Option<f64>>) -> Self {
        Self {
            rates,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeRateSource for FakeExchange {
    async fn exchange_rate(&self) -> Option<f64> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.rates
            .get(call)
            .or_else(|| self.rates.last())
            .copied()
            .flatten()
    }
}

/// Published reading for a zone as seen in the exposition output
pub(crate) fn reading_for(metrics: &ExporterMetrics, display_name: &str) -> Option<ZoneReading> {
    let text = metrics.render().expect("render should succeed");
    let sample = |metric: &str| {
        let prefix = format!("{metric}{{zone=\"{display_name}\"}} ");
        text.lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
            .map(|value| value.parse::<f64>().expect("numeric sample"))
    };
    Some(ZoneReading {
        carbon_intensity: sample("grid_carbon_intensity_stats")?,
        renewable_share: sample("grid_renewable_percentage")?,
        price_nok_per_kwh: sample("electricity_price_nok_per_kwh")?,
    })
}
