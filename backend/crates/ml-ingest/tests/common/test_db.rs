use ml_db::{PoolOptions, open_pool, run_migrations};

use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Creates an on-disk database shared by several connections.
/// Keep the TempDir alive for as long as the pool is used.
pub async fn create_file_pool(busy_timeout: Duration) -> (SqlitePool, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pool = open_pool(
        &dir.path().join("ingest.db"),
        PoolOptions {
            max_connections: 4,
            busy_timeout,
        },
    )
    .await
    .expect("Failed to open file pool");

    (pool, dir)
}

/// Makes any insert of `content_id` fail, to break a scan halfway through.
pub async fn poison_content_id(pool: &SqlitePool, content_id: &str) {
    let sql = format!(
        "CREATE TRIGGER reject_{content_id} BEFORE INSERT ON listens \
         WHEN NEW.external_content_id = '{content_id}' \
         BEGIN SELECT RAISE(ABORT, 'poisoned listen'); END"
    );
    sqlx::query(&sql)
        .execute(pool)
        .await
        .expect("Failed to create trigger");
}
