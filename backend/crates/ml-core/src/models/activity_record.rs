use crate::{ActivityEvent, Provider};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A durable listen. Unique per (user, content, occurred_at); never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub source: Provider,
    pub external_content_id: String,
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn from_event(user_id: Uuid, source: Provider, event: &ActivityEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            source,
            external_content_id: event.external_content_id.clone(),
            occurred_at: event.occurred_at,
            created_at: Utc::now(),
        }
    }
}
