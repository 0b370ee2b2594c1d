//! # Refresh Metrics
//!
//! Operational metrics for the refresh loop: cycles by outcome, skipped zone
//! updates, and cycle duration.

use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};

/// How a refresh cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Exchange rate resolved and every zone update ran
    Success,
    /// Exchange rate unavailable, zones skipped
    NoExchangeRate,
    /// An error or panic escaped the cycle body
    Failure,
}

impl CycleOutcome {
    /// Label value for metrics
    pub fn as_str(self) -> &'static str {
        match self {
            CycleOutcome::Success => "success",
            CycleOutcome::NoExchangeRate => "no_exchange_rate",
            CycleOutcome::Failure => "failure",
        }
    }
}

#[derive(Clone)]
pub struct RefreshMetrics {
    cycles_total: IntCounterVec,
    zone_updates_skipped_total: IntCounterVec,
    cycle_duration: Histogram,
}

impl std::fmt::Debug for RefreshMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshMetrics").finish_non_exhaustive()
    }
}

impl RefreshMetrics {
    pub(crate) fn new() -> prometheus::Result<Self> {
        Ok(Self {
            cycles_total: IntCounterVec::new(
                Opts::new(
                    "electricity_exporter_refresh_cycles_total",
                    "Total number of refresh cycles by outcome",
                ),
                &["outcome"],
            )?,
            zone_updates_skipped_total: IntCounterVec::new(
                Opts::new(
                    "electricity_exporter_zone_updates_skipped_total",
                    "Zone updates skipped because upstream data was incomplete",
                ),
                &["zone"],
            )?,
            cycle_duration: Histogram::with_opts(
                HistogramOpts::new(
                    "electricity_exporter_refresh_duration_seconds",
                    "Duration of a refresh cycle in seconds",
                )
                .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
            )?,
        })
    }

    /// Register refresh metrics with the registry
    pub(crate) fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.cycles_total.clone()))?;
        registry.register(Box::new(self.zone_updates_skipped_total.clone()))?;
        registry.register(Box::new(self.cycle_duration.clone()))?;
        Ok(())
    }

    pub fn record_cycle(&self, outcome: CycleOutcome, duration_secs: f64) {
        self.cycles_total.with_label_values(&[outcome.as_str()]).inc();
        self.cycle_duration.observe(duration_secs);
    }

    #[cfg(test)]
    pub(crate) fn cycles(&self, outcome: CycleOutcome) -> u64 {
        self.cycles_total.with_label_values(&[outcome.as_str()]).get()
    }

    pub fn increment_zone_skipped(&self, zone: &str) {
        self.zone_updates_skipped_total.with_label_values(&[zone]).inc();
    }

    #[cfg(test)]
    pub(crate) fn zone_skipped(&self, zone: &str) -> u64 {
        self.zone_updates_skipped_total.with_label_values(&[zone]).get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_cycle() {
        let metrics = RefreshMetrics::new().expect("valid metric definitions");
        metrics.record_cycle(CycleOutcome::Success, 0.3);
        metrics.record_cycle(CycleOutcome::Success, 0.2);
        metrics.record_cycle(CycleOutcome::Failure, 1.0);
        assert_eq!(metrics.cycles(CycleOutcome::Success), 2);
        assert_eq!(metrics.cycles(CycleOutcome::Failure), 1);
        assert_eq!(metrics.cycles(CycleOutcome::NoExchangeRate), 0);
        assert_eq!(metrics.cycle_duration.get_sample_count(), 3);
    }

    #[test]
    fn test_increment_zone_skipped() {
        let metrics = RefreshMetrics::new().expect("valid metric definitions");
        metrics.increment_zone_skipped("Central-Norway");
        assert_eq!(metrics.zone_skipped("Central-Norway"), 1);
        assert_eq!(metrics.zone_skipped("North-Norway"), 0);
    }
}
