use crate::cursor_tracker::CursorTracker;
use crate::{IngestError, IngestResult, Metrics, ScanReport};

use ml_config::{CursorStrategy, PollerConfig};
use ml_core::{ActivityRecord, ActivitySource, Provider};
use ml_db::ListenStore;

use std::time::Instant;

use log::{debug, error, info, warn};
use tracing::instrument;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Copy)]
pub struct ScannerConfig {
    /// Events requested from the source per scan
    pub page_size: u32,
    pub cursor_strategy: CursorStrategy,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cursor_strategy: CursorStrategy::default(),
        }
    }
}

impl From<&PollerConfig> for ScannerConfig {
    fn from(config: &PollerConfig) -> Self {
        Self {
            page_size: config.page_size,
            cursor_strategy: config.cursor_strategy,
        }
    }
}

/// Runs one atomic scan of one account at a time.
pub struct AccountScanner<St, Src> {
    store: St,
    source: Src,
    config: ScannerConfig,
    metrics: Metrics,
}

impl<St, Src> AccountScanner<St, Src>
where
    St: ListenStore,
    Src: ActivitySource,
{
    pub fn new(store: St, source: Src, config: ScannerConfig) -> Self {
        Self {
            store,
            source,
            config,
            metrics: Metrics::new(),
        }
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn provider(&self) -> Provider {
        self.source.provider()
    }

    /// Ingest everything newer than the account's cursor.
    ///
    /// The account row stays locked from the first statement until commit,
    /// so concurrent scans of the same account (in any process) wait for
    /// this one and then resume from its cursor. Any failure rolls back the
    /// listens and the cursor together.
    #[instrument(skip(self), fields(provider = %self.provider()))]
    pub async fn scan(&self, account_id: &str) -> IngestResult<ScanReport> {
        let started = Instant::now();
        let mut tx = match self.store.begin().await {
            Ok(tx) => tx,
            Err(err) => return Err(self.scan_failed(account_id, err.into())),
        };

        let outcome = match self.scan_locked(&mut tx, account_id).await {
            Ok(report) => match self.store.commit(tx).await {
                Ok(()) => Ok(report),
                Err(err) => Err(IngestError::from(err)),
            },
            Err(err) => {
                self.rollback(tx, account_id).await;
                Err(err)
            }
        };

        match outcome {
            Ok(report) => {
                self.metrics.scan_completed(&report, started.elapsed());

                info!(
                    "Scanned {} account {}: {} new listens ({} fetched, {} duplicates)",
                    self.provider(),
                    account_id,
                    report.inserted,
                    report.fetched,
                    report.duplicates
                );
                Ok(report)
            }
            Err(err) => Err(self.scan_failed(account_id, err)),
        }
    }

    fn scan_failed(&self, account_id: &str, err: IngestError) -> IngestError {
        self.metrics.scan_failed(err.kind());
        warn!("Scan of {} account {} failed: {}", self.provider(), account_id, err);
        err
    }

    async fn scan_locked(&self, tx: &mut St::Tx, account_id: &str) -> IngestResult<ScanReport> {
        let provider = self.provider();
        let account = self
            .store
            .lock_account_for_update(tx, provider, account_id)
            .await?
            .ok_or_else(|| IngestError::account_not_found(account_id))?;

        let after = account.fetch_after_epoch_millis();
        debug!(
            "Fetching up to {} events for {} account {} after {:?}",
            self.config.page_size, provider, account_id, after
        );

        let events = self
            .source
            .fetch_recent_activity(&account.credentials, after, self.config.page_size)
            .await
            .map_err(|source| IngestError::source_failed(account_id, source))?;

        let mut cursor = CursorTracker::new(self.config.cursor_strategy);
        let mut inserted = 0;
        for event in &events {
            let record = ActivityRecord::from_event(account.user_id, provider, event);
            if self.store.insert_activity_record(tx, &record).await? {
                inserted += 1;
                debug!(
                    "Recorded listen {} ({}) at {}",
                    event.external_content_id,
                    event.title.as_deref().unwrap_or("untitled"),
                    event.occurred_at
                );
            } else {
                debug!(
                    "Skipping duplicate listen {} at {}",
                    event.external_content_id, event.occurred_at
                );
            }
            cursor.observe(event.occurred_at);
        }

        if cursor.out_of_order() {
            warn!(
                "{} returned events out of order for account {}; cursor strategy is {}",
                provider,
                account_id,
                self.config.cursor_strategy.as_str()
            );
            self.metrics.batch_out_of_order();
        }

        let mut cursor_after = account.last_synced_at;
        if let Some(next) = cursor.next_cursor() {
            self.store.update_account_cursor(tx, account.id, next).await?;
            cursor_after = Some(next);
        }

        Ok(ScanReport {
            account_id: account_id.to_string(),
            fetched: events.len(),
            inserted,
            duplicates: events.len() - inserted,
            cursor_before: account.last_synced_at,
            cursor_after,
        })
    }

    async fn rollback(&self, tx: St::Tx, account_id: &str) {
        match self.store.rollback(tx).await {
            Ok(()) => debug!("Rolled back scan of account {}", account_id),
            Err(err) if err.is_connection_closed() => {
                debug!("Scan of account {} already released its connection: {}", account_id, err)
            }
            Err(err) => {
                self.metrics.rollback_failed();
                error!("Failed to roll back scan of account {}: {}", account_id, err);
            }
        }
    }
}
