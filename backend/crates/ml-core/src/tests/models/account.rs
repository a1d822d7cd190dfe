use crate::{Account, OAuthToken, Provider};

use chrono::{TimeZone, Utc};
use uuid::Uuid;

#[test]
fn given_unsynced_account_when_computing_bound_then_fetches_from_origin() {
    let account = Account::new(
        Uuid::new_v4(),
        Provider::Spotify,
        "spotify-user",
        OAuthToken::bearer("abc"),
    );

    assert_eq!(account.fetch_after_epoch_millis(), None);
}

#[test]
fn given_synced_account_when_computing_bound_then_one_millisecond_past_cursor() {
    let mut account = Account::new(
        Uuid::new_v4(),
        Provider::Spotify,
        "spotify-user",
        OAuthToken::bearer("abc"),
    );
    let cursor = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    account.last_synced_at = Some(cursor);

    assert_eq!(account.fetch_after_epoch_millis(), Some(1_700_000_000_124));
}
