use crate::{AccountScanner, IngestError, IngestResult, Metrics};

use ml_config::{PollerConfig, SweepPolicy};
use ml_core::ActivitySource;
use ml_db::ListenStore;

use std::time::{Duration, Instant};

use log::{error, info, warn};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info_span};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub struct PollerSettings {
    /// Delay between the end of one sweep and the start of the next
    pub interval: Duration,
    pub sweep_policy: SweepPolicy,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            sweep_policy: SweepPolicy::default(),
        }
    }
}

impl From<&PollerConfig> for PollerSettings {
    fn from(config: &PollerConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_secs),
            sweep_policy: config.sweep_policy,
        }
    }
}

/// Totals for one pass over every account of the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub accounts: usize,
    pub scanned: usize,
    pub failed: usize,
    pub inserted: usize,
}

/// Recurring sweep over all accounts of the scanner's provider.
pub struct Poller<St, Src> {
    scanner: AccountScanner<St, Src>,
    settings: PollerSettings,
    metrics: Metrics,
}

impl<St, Src> Poller<St, Src>
where
    St: ListenStore,
    Src: ActivitySource,
{
    pub fn new(scanner: AccountScanner<St, Src>, settings: PollerSettings) -> Self {
        Self {
            scanner,
            settings,
            metrics: Metrics::new(),
        }
    }

    /// Sweep, wait, repeat.
    ///
    /// Only returns on error: a failed sweep under [`SweepPolicy::FailFast`],
    /// or [`IngestError::Cancelled`] when `cancel` fires during the wait.
    /// Cancellation is not observed mid-sweep.
    pub async fn run(&self, cancel: CancellationToken) -> IngestResult<()> {
        info!(
            "Starting {} poller (interval: {:?}, sweep policy: {})",
            self.scanner.provider(),
            self.settings.interval,
            self.settings.sweep_policy.as_str()
        );

        loop {
            self.sweep().await?;

            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    info!("{} poller cancelled", self.scanner.provider());
                    return Err(IngestError::cancelled());
                }

                _ = tokio::time::sleep(self.settings.interval) => {}
            }
        }
    }

    /// Scan every account of the provider once, sequentially.
    pub async fn sweep(&self) -> IngestResult<SweepReport> {
        let provider = self.scanner.provider();
        let started = Instant::now();

        let accounts = self
            .scanner
            .store()
            .list_accounts_for_provider(provider)
            .await?;

        let mut report = SweepReport {
            accounts: accounts.len(),
            ..SweepReport::default()
        };

        let span = info_span!("sweep", %provider, accounts = accounts.len());
        async {
            for account in &accounts {
                match self.scanner.scan(&account.external_account_id).await {
                    Ok(scan) => {
                        report.scanned += 1;
                        report.inserted += scan.inserted;
                    }
                    Err(err) => match self.settings.sweep_policy {
                        SweepPolicy::FailFast => {
                            error!(
                                "Scan of {} account {} failed, aborting sweep: {}",
                                provider, account.external_account_id, err
                            );
                            return Err(err);
                        }
                        SweepPolicy::ContinueOnError => {
                            warn!(
                                "Scan of {} account {} failed, continuing sweep: {}",
                                provider, account.external_account_id, err
                            );
                            report.failed += 1;
                        }
                    },
                }
            }
            Ok(())
        }
        .instrument(span)
        .await?;

        self.metrics
            .sweep_completed(report.accounts, report.failed, started.elapsed());
        info!(
            "Swept {} {} accounts: {} scanned, {} failed, {} new listens",
            report.accounts, provider, report.scanned, report.failed, report.inserted
        );

        Ok(report)
    }
}
