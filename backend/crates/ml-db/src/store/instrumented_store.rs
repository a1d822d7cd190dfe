use crate::Result as DbErrorResult;
use crate::store::ListenStore;

use ml_core::{Account, ActivityRecord, Provider};

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use tracing::{Instrument, debug_span};
use uuid::Uuid;

/// Wraps another [`ListenStore`], giving every call its own tracing span
/// and latency/error metrics.
#[derive(Debug, Clone)]
pub struct InstrumentedStore<S> {
    inner: S,
    prefix: &'static str,
}

impl<S: ListenStore> InstrumentedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            prefix: "ml_db",
        }
    }

    async fn observe<T, F>(&self, operation: &'static str, call: F) -> DbErrorResult<T>
    where
        F: Future<Output = DbErrorResult<T>>,
    {
        let span = debug_span!("store", operation);
        let start = Instant::now();

        let result = call.instrument(span).await;

        histogram!(format!("{}.{}.latency_ms", self.prefix, operation))
            .record(start.elapsed().as_secs_f64() * 1000.0);

        if let Err(ref e) = result {
            counter!(format!("{}.{}.errors", self.prefix, operation)).increment(1);
            log::debug!("Store call {} failed: {}", operation, e);
        }

        result
    }
}

#[async_trait]
impl<S: ListenStore> ListenStore for InstrumentedStore<S> {
    type Tx = S::Tx;

    async fn list_accounts_for_provider(&self, provider: Provider) -> DbErrorResult<Vec<Account>> {
        self.observe(
            "list_accounts_for_provider",
            self.inner.list_accounts_for_provider(provider),
        )
        .await
    }

    async fn begin(&self) -> DbErrorResult<Self::Tx> {
        self.observe("begin", self.inner.begin()).await
    }

    async fn lock_account_for_update(
        &self,
        tx: &mut Self::Tx,
        provider: Provider,
        external_account_id: &str,
    ) -> DbErrorResult<Option<Account>> {
        self.observe(
            "lock_account_for_update",
            self.inner
                .lock_account_for_update(tx, provider, external_account_id),
        )
        .await
    }

    async fn insert_activity_record(
        &self,
        tx: &mut Self::Tx,
        record: &ActivityRecord,
    ) -> DbErrorResult<bool> {
        self.observe(
            "insert_activity_record",
            self.inner.insert_activity_record(tx, record),
        )
        .await
    }

    async fn update_account_cursor(
        &self,
        tx: &mut Self::Tx,
        account_id: Uuid,
        last_synced_at: DateTime<Utc>,
    ) -> DbErrorResult<()> {
        self.observe(
            "update_account_cursor",
            self.inner
                .update_account_cursor(tx, account_id, last_synced_at),
        )
        .await
    }

    async fn commit(&self, tx: Self::Tx) -> DbErrorResult<()> {
        self.observe("commit", self.inner.commit(tx)).await
    }

    async fn rollback(&self, tx: Self::Tx) -> DbErrorResult<()> {
        self.observe("rollback", self.inner.rollback(tx)).await
    }
}
