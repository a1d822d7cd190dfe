use crate::Result as DbErrorResult;

use ml_core::User;

pub struct UserRepository;

impl UserRepository {
    pub async fn create<'e, E>(executor: E, user: &User) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query("INSERT INTO users (id, created_at) VALUES (?, ?)")
            .bind(user.id.to_string())
            .bind(user.created_at.timestamp_millis())
            .execute(executor)
            .await?;

        Ok(())
    }
}
