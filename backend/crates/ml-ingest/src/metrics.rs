use crate::ScanReport;

use std::time::Duration;

use metrics::{counter, histogram};

/// Metrics collector for ingestion
#[derive(Debug, Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "ml_ingest" }
    }

    /// Record a committed scan
    pub fn scan_completed(&self, report: &ScanReport, duration: Duration) {
        counter!(format!("{}.scans.completed", self.prefix)).increment(1);
        counter!(format!("{}.listens.inserted", self.prefix)).increment(report.inserted as u64);
        counter!(format!("{}.listens.duplicates", self.prefix))
            .increment(report.duplicates as u64);
        histogram!(format!("{}.scans.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }

    /// Record a scan that was rolled back
    pub fn scan_failed(&self, error_kind: &str) {
        counter!(format!("{}.scans.failed", self.prefix)).increment(1);
        counter!(format!("{}.scans.failed.{}", self.prefix, error_kind)).increment(1);
    }

    /// Record a batch that violated newest-first ordering
    pub fn batch_out_of_order(&self) {
        counter!(format!("{}.batches.out_of_order", self.prefix)).increment(1);
    }

    /// Record rollback failure
    pub fn rollback_failed(&self) {
        counter!(format!("{}.rollbacks.failed", self.prefix)).increment(1);
    }

    /// Record a finished sweep over all accounts
    pub fn sweep_completed(&self, accounts: usize, failed: usize, duration: Duration) {
        counter!(format!("{}.sweeps.completed", self.prefix)).increment(1);
        histogram!(format!("{}.sweeps.accounts", self.prefix)).record(accounts as f64);
        if failed > 0 {
            counter!(format!("{}.sweeps.account_failures", self.prefix)).increment(failed as u64);
        }
        histogram!(format!("{}.sweeps.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
