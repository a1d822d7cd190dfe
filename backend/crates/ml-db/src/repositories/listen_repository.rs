use crate::repositories::{from_epoch_millis, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use ml_core::{ActivityRecord, Provider};

use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow)]
struct ListenRow {
    id: String,
    user_id: String,
    source: String,
    external_content_id: String,
    occurred_at: i64,
    created_at: i64,
}

impl TryFrom<ListenRow> for ActivityRecord {
    type Error = DbError;

    fn try_from(row: ListenRow) -> DbErrorResult<Self> {
        let source: Provider = row
            .source
            .parse()
            .map_err(|e: ml_core::CoreError| DbError::decode("source", &row.id, e.to_string()))?;

        Ok(ActivityRecord {
            id: parse_uuid("id", &row.id, &row.id)?,
            user_id: parse_uuid("user_id", &row.id, &row.user_id)?,
            source,
            external_content_id: row.external_content_id,
            occurred_at: from_epoch_millis("occurred_at", &row.id, row.occurred_at)?,
            created_at: from_epoch_millis("created_at", &row.id, row.created_at)?,
        })
    }
}

pub struct ListenRepository;

impl ListenRepository {
    /// Insert a listen. Returns `false` when the same user already has a
    /// listen of this content at this instant.
    pub async fn create<'e, E>(executor: E, record: &ActivityRecord) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query(
            r#"
              INSERT INTO listens (
                  id, user_id, source, external_content_id, occurred_at, created_at
              ) VALUES (?, ?, ?, ?, ?, ?)
              ON CONFLICT(user_id, external_content_id, occurred_at) DO NOTHING
              "#,
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(record.source.as_str())
        .bind(&record.external_content_id)
        .bind(record.occurred_at.timestamp_millis())
        .bind(record.created_at.timestamp_millis())
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Most recent listens first.
    pub async fn list_for_user<'e, E>(
        executor: E,
        user_id: Uuid,
        limit: i64,
    ) -> DbErrorResult<Vec<ActivityRecord>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query_as::<_, ListenRow>(
            r#"
              SELECT id, user_id, source, external_content_id, occurred_at, created_at
              FROM listens
              WHERE user_id = ?
              ORDER BY occurred_at DESC
              LIMIT ?
              "#,
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(executor)
        .await?
        .into_iter()
        .map(ActivityRecord::try_from)
        .collect()
    }

    pub async fn count_for_user<'e, E>(executor: E, user_id: Uuid) -> DbErrorResult<i64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM listens WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
