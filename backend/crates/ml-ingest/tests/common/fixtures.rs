use ml_core::{Account, ActivityEvent, OAuthToken, Provider, User};
use ml_db::{AccountRepository, ListenRepository, UserRepository};

use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;

/// Millisecond-precision instant, matching what the database stores.
pub fn at_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).unwrap()
}

pub fn event(content_id: &str, millis: i64) -> ActivityEvent {
    ActivityEvent::new(content_id, at_millis(millis))
}

/// Inserts a user and a Spotify account linked to it
pub async fn create_test_account(pool: &SqlitePool, external_account_id: &str) -> Account {
    create_test_account_at(pool, external_account_id, Utc::now()).await
}

/// Like [`create_test_account`] with a fixed creation time, which decides
/// the order accounts are swept in.
pub async fn create_test_account_at(
    pool: &SqlitePool,
    external_account_id: &str,
    created_at: DateTime<Utc>,
) -> Account {
    let user = User::new();
    UserRepository::create(pool, &user)
        .await
        .expect("Failed to create test user");

    let mut account = Account::new(
        user.id,
        Provider::Spotify,
        external_account_id,
        OAuthToken::bearer(format!("token-for-{external_account_id}")),
    );
    account.created_at = created_at;
    AccountRepository::create(pool, &account)
        .await
        .expect("Failed to create test account");

    account
}

pub async fn set_cursor(pool: &SqlitePool, account: &Account, millis: i64) {
    AccountRepository::update_cursor(pool, account.id, at_millis(millis))
        .await
        .expect("Failed to set cursor");
}

pub async fn reload(pool: &SqlitePool, account: &Account) -> Account {
    AccountRepository::find_by_external_id(pool, Provider::Spotify, &account.external_account_id)
        .await
        .expect("Failed to reload account")
        .expect("account should exist")
}

pub async fn listen_count(pool: &SqlitePool, account: &Account) -> i64 {
    ListenRepository::count_for_user(pool, account.user_id)
        .await
        .expect("Failed to count listens")
}
