use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One remote listen as reported by an activity source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityEvent {
    pub external_content_id: String,
    pub occurred_at: DateTime<Utc>,
    /// Human readable title, for log output.
    pub title: Option<String>,
}

impl ActivityEvent {
    pub fn new(external_content_id: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            external_content_id: external_content_id.into(),
            occurred_at,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
