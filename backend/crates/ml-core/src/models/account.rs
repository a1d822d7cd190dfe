use crate::{OAuthToken, Provider};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A local user's linked identity with one external provider.
///
/// `last_synced_at` is the resume cursor: the newest listen already ingested
/// for this account. `None` until the first scan that saw any listens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: Provider,
    pub external_account_id: String,
    pub credentials: OAuthToken,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        user_id: Uuid,
        provider: Provider,
        external_account_id: impl Into<String>,
        credentials: OAuthToken,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            provider,
            external_account_id: external_account_id.into(),
            credentials,
            last_synced_at: None,
            created_at: Utc::now(),
        }
    }

    /// Exclusive lower bound for the next fetch, in epoch milliseconds.
    ///
    /// One millisecond past the cursor, or `None` for a first sync.
    pub fn fetch_after_epoch_millis(&self) -> Option<i64> {
        self.last_synced_at
            .map(|cursor| cursor.timestamp_millis().saturating_add(1))
    }
}
