use crate::store::ListenStore;
use crate::{AccountRepository, ListenRepository, Result as DbErrorResult};

use ml_core::{Account, ActivityRecord, Provider};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

/// [`ListenStore`] backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteListenStore {
    pool: SqlitePool,
}

impl SqliteListenStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ListenStore for SqliteListenStore {
    type Tx = Transaction<'static, Sqlite>;

    async fn list_accounts_for_provider(&self, provider: Provider) -> DbErrorResult<Vec<Account>> {
        AccountRepository::list_by_provider(&self.pool, provider).await
    }

    async fn begin(&self) -> DbErrorResult<Self::Tx> {
        Ok(self.pool.begin().await?)
    }

    async fn lock_account_for_update(
        &self,
        tx: &mut Self::Tx,
        provider: Provider,
        external_account_id: &str,
    ) -> DbErrorResult<Option<Account>> {
        AccountRepository::lock_for_update(&mut **tx, provider, external_account_id).await
    }

    async fn insert_activity_record(
        &self,
        tx: &mut Self::Tx,
        record: &ActivityRecord,
    ) -> DbErrorResult<bool> {
        ListenRepository::create(&mut **tx, record).await
    }

    async fn update_account_cursor(
        &self,
        tx: &mut Self::Tx,
        account_id: Uuid,
        last_synced_at: DateTime<Utc>,
    ) -> DbErrorResult<()> {
        AccountRepository::update_cursor(&mut **tx, account_id, last_synced_at).await
    }

    async fn commit(&self, tx: Self::Tx) -> DbErrorResult<()> {
        Ok(tx.commit().await?)
    }

    async fn rollback(&self, tx: Self::Tx) -> DbErrorResult<()> {
        Ok(tx.rollback().await?)
    }
}
