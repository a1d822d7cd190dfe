use crate::repositories::{from_epoch_millis, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use ml_core::{Account, OAuthToken, Provider};

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

const ACCOUNT_COLUMNS: &str =
    "id, user_id, provider, external_account_id, credentials, last_synced_at, created_at";

#[derive(FromRow)]
struct AccountRow {
    id: String,
    user_id: String,
    provider: String,
    external_account_id: String,
    credentials: String,
    last_synced_at: Option<i64>,
    created_at: i64,
}

impl TryFrom<AccountRow> for Account {
    type Error = DbError;

    fn try_from(row: AccountRow) -> DbErrorResult<Self> {
        let provider: Provider = row
            .provider
            .parse()
            .map_err(|e: ml_core::CoreError| DbError::decode("provider", &row.id, e.to_string()))?;
        let credentials = OAuthToken::from_json(&row.credentials)
            .map_err(|e| DbError::decode("credentials", &row.id, e.to_string()))?;
        let last_synced_at = row
            .last_synced_at
            .map(|millis| from_epoch_millis("last_synced_at", &row.id, millis))
            .transpose()?;

        Ok(Account {
            id: parse_uuid("id", &row.id, &row.id)?,
            user_id: parse_uuid("user_id", &row.id, &row.user_id)?,
            provider,
            external_account_id: row.external_account_id,
            credentials,
            last_synced_at,
            created_at: from_epoch_millis("created_at", &row.id, row.created_at)?,
        })
    }
}

pub struct AccountRepository;

impl AccountRepository {
    pub async fn create<'e, E>(executor: E, account: &Account) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let credentials = account
            .credentials
            .to_json()
            .map_err(|e| DbError::decode("credentials", account.id.to_string(), e.to_string()))?;

        sqlx::query(
            r#"
              INSERT INTO accounts (
                  id, user_id, provider, external_account_id,
                  credentials, last_synced_at, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(account.id.to_string())
        .bind(account.user_id.to_string())
        .bind(account.provider.as_str())
        .bind(&account.external_account_id)
        .bind(credentials)
        .bind(account.last_synced_at.map(|t| t.timestamp_millis()))
        .bind(account.created_at.timestamp_millis())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_external_id<'e, E>(
        executor: E,
        provider: Provider,
        external_account_id: &str,
    ) -> DbErrorResult<Option<Account>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE provider = ? AND external_account_id = ?"
        );

        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(provider.as_str())
            .bind(external_account_id)
            .fetch_optional(executor)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    pub async fn list_by_provider<'e, E>(
        executor: E,
        provider: Provider,
    ) -> DbErrorResult<Vec<Account>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE provider = ? ORDER BY created_at, id"
        );

        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(provider.as_str())
            .fetch_all(executor)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    /// Take the write lock on an account row inside the caller's transaction.
    ///
    /// SQLite has no `SELECT ... FOR UPDATE`; a no-op `UPDATE ... RETURNING`
    /// acquires the database write lock instead, so any other transaction
    /// locking an account waits (up to the busy timeout) until this one ends.
    /// Must be the first statement of the transaction.
    pub async fn lock_for_update<'e, E>(
        executor: E,
        provider: Provider,
        external_account_id: &str,
    ) -> DbErrorResult<Option<Account>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!(
            r#"
              UPDATE accounts
              SET last_synced_at = last_synced_at
              WHERE provider = ? AND external_account_id = ?
              RETURNING {ACCOUNT_COLUMNS}
              "#
        );

        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(provider.as_str())
            .bind(external_account_id)
            .fetch_optional(executor)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    pub async fn update_cursor<'e, E>(
        executor: E,
        account_id: Uuid,
        last_synced_at: DateTime<Utc>,
    ) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query("UPDATE accounts SET last_synced_at = ? WHERE id = ?")
            .bind(last_synced_at.timestamp_millis())
            .bind(account_id.to_string())
            .execute(executor)
            .await?;

        Ok(())
    }
}
