pub mod instrumented_store;
pub mod sqlite_listen_store;

use crate::Result as DbErrorResult;

use ml_core::{Account, ActivityRecord, Provider};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Durable storage consumed by the ingestion engine.
///
/// Every write happens inside a transaction obtained from [`begin`]. Holding
/// the lock from [`lock_account_for_update`] serialises scans of the same
/// account, across processes, until [`commit`] or [`rollback`].
///
/// [`begin`]: ListenStore::begin
/// [`lock_account_for_update`]: ListenStore::lock_account_for_update
/// [`commit`]: ListenStore::commit
/// [`rollback`]: ListenStore::rollback
#[async_trait]
pub trait ListenStore: Send + Sync {
    type Tx: Send;

    async fn list_accounts_for_provider(&self, provider: Provider) -> DbErrorResult<Vec<Account>>;

    async fn begin(&self) -> DbErrorResult<Self::Tx>;

    /// `None` when no account matches.
    async fn lock_account_for_update(
        &self,
        tx: &mut Self::Tx,
        provider: Provider,
        external_account_id: &str,
    ) -> DbErrorResult<Option<Account>>;

    /// `false` when an identical listen already exists and nothing was written.
    async fn insert_activity_record(
        &self,
        tx: &mut Self::Tx,
        record: &ActivityRecord,
    ) -> DbErrorResult<bool>;

    async fn update_account_cursor(
        &self,
        tx: &mut Self::Tx,
        account_id: Uuid,
        last_synced_at: DateTime<Utc>,
    ) -> DbErrorResult<()>;

    async fn commit(&self, tx: Self::Tx) -> DbErrorResult<()>;

    async fn rollback(&self, tx: Self::Tx) -> DbErrorResult<()>;
}
