use ml_core::{Account, ActivityEvent, ActivityRecord, OAuthToken, Provider, User};
use ml_db::{AccountRepository, UserRepository};

use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Millisecond-precision instant, matching what the database stores.
pub fn at_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).unwrap()
}

/// Inserts a user and a Spotify account linked to it
pub async fn create_test_account(pool: &SqlitePool, external_account_id: &str) -> Account {
    let user = User::new();
    UserRepository::create(pool, &user)
        .await
        .expect("Failed to create test user");

    let account = Account::new(
        user.id,
        Provider::Spotify,
        external_account_id,
        OAuthToken::bearer(format!("token-for-{external_account_id}")),
    );
    AccountRepository::create(pool, &account)
        .await
        .expect("Failed to create test account");

    account
}

/// Creates a listen for `user_id` at the given instant
pub fn create_test_listen(user_id: Uuid, content_id: &str, occurred_at: DateTime<Utc>) -> ActivityRecord {
    ActivityRecord::from_event(
        user_id,
        Provider::Spotify,
        &ActivityEvent::new(content_id, occurred_at),
    )
}
