//! # Refresh Loop
//!
//! The background task that keeps the gauges current.
//!
//! Each cycle resolves the exchange rate, then updates every zone
//! concurrently, then sets the health gauge. Cycles never overlap: the next
//! one starts after the previous one finished and the interval elapsed.
//! Errors and panics inside a cycle are contained here so the loop only
//! stops when its cancellation token fires.

use anyhow::{anyhow, Result};
use futures::future::join_all;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};

use super::zone_updater::{is_usable_rate, update_zone};
use crate::observability::metrics::{CycleOutcome, ExporterMetrics};
use crate::sources::{ExchangeRateSource, GridDataSource};
use crate::zones::Zone;

pub struct RefreshLoop {
    grid: Arc<dyn GridDataSource>,
    exchange: Arc<dyn ExchangeRateSource>,
    metrics: Arc<ExporterMetrics>,
    zones: Vec<Zone>,
    interval: Duration,
}

impl std::fmt::Debug for RefreshLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshLoop")
            .field("zones", &self.zones)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl RefreshLoop {
    pub fn new(
        grid: Arc<dyn GridDataSource>,
        exchange: Arc<dyn ExchangeRateSource>,
        metrics: Arc<ExporterMetrics>,
        zones: Vec<Zone>,
        interval: Duration,
    ) -> Self {
        Self {
            grid,
            exchange,
            metrics,
            zones,
            interval,
        }
    }

    /// Run cycles until `cancel` fires
    ///
    /// Cancellation is observed while a cycle is in flight and while sleeping.
    pub async fn run(self, cancel: CancellationToken) {
        info!(
            "Refresh loop started: {} zones every {}s",
            self.zones.len(),
            self.interval.as_secs()
        );

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = self.run_guarded_cycle() => {}
            }
            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Refresh loop stopped");
    }

    /// Run one cycle, converting any error or panic into a failed cycle
    pub async fn run_guarded_cycle(&self) -> CycleOutcome {
        let started = Instant::now();
        let span = info_span!("refresh_cycle", zones = self.zones.len());

        let outcome = match AssertUnwindSafe(self.run_cycle())
            .catch_unwind()
            .instrument(span)
            .await
        {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!("Critical failure: {:#}", e);
                self.metrics.grid.set_up(false);
                CycleOutcome::Failure
            }
            Err(panic) => {
                error!("Critical failure: refresh cycle panicked: {}", panic_message(&*panic));
                self.metrics.grid.set_up(false);
                CycleOutcome::Failure
            }
        };

        self.metrics
            .refresh
            .record_cycle(outcome, started.elapsed().as_secs_f64());
        outcome
    }

    async fn run_cycle(&self) -> Result<CycleOutcome> {
        let Some(rate) = self
            .exchange
            .exchange_rate()
            .await
            .filter(|rate| is_usable_rate(*rate))
        else {
            warn!("Exchange rate unavailable, skipping zone updates");
            self.metrics.grid.set_up(false);
            return Ok(CycleOutcome::NoExchangeRate);
        };

        let results = join_all(
            self.zones
                .iter()
                .map(|zone| update_zone(self.grid.as_ref(), &self.metrics, zone, rate)),
        )
        .await;

        let failures: Vec<_> = results.into_iter().filter_map(Result::err).collect();
        if !failures.is_empty() {
            for failure in &failures {
                error!("Zone update failed: {}", failure);
            }
            return Err(anyhow!(
                "{} of {} zone updates failed",
                failures.len(),
                self.zones.len()
            ));
        }

        self.metrics.grid.set_up(true);
        Ok(CycleOutcome::Success)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}
