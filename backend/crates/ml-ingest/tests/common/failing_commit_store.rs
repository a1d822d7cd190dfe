use ml_core::{Account, ActivityRecord, Provider};
use ml_db::{DbError, ListenStore, Result as DbErrorResult, SqliteListenStore};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// SQLite store whose commits always fail; the transaction is dropped
/// without being committed.
pub struct FailingCommitStore {
    inner: SqliteListenStore,
}

impl FailingCommitStore {
    pub fn new(inner: SqliteListenStore) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ListenStore for FailingCommitStore {
    type Tx = <SqliteListenStore as ListenStore>::Tx;

    async fn list_accounts_for_provider(&self, provider: Provider) -> DbErrorResult<Vec<Account>> {
        self.inner.list_accounts_for_provider(provider).await
    }

    async fn begin(&self) -> DbErrorResult<Self::Tx> {
        self.inner.begin().await
    }

    async fn lock_account_for_update(
        &self,
        tx: &mut Self::Tx,
        provider: Provider,
        external_account_id: &str,
    ) -> DbErrorResult<Option<Account>> {
        self.inner
            .lock_account_for_update(tx, provider, external_account_id)
            .await
    }

    async fn insert_activity_record(
        &self,
        tx: &mut Self::Tx,
        record: &ActivityRecord,
    ) -> DbErrorResult<bool> {
        self.inner.insert_activity_record(tx, record).await
    }

    async fn update_account_cursor(
        &self,
        tx: &mut Self::Tx,
        account_id: Uuid,
        last_synced_at: DateTime<Utc>,
    ) -> DbErrorResult<()> {
        self.inner
            .update_account_cursor(tx, account_id, last_synced_at)
            .await
    }

    async fn commit(&self, tx: Self::Tx) -> DbErrorResult<()> {
        drop(tx);
        Err(DbError::from(sqlx::Error::Protocol(String::from(
            "commit rejected",
        ))))
    }

    async fn rollback(&self, tx: Self::Tx) -> DbErrorResult<()> {
        self.inner.rollback(tx).await
    }
}
