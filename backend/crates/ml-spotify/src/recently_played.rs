use ml_core::ActivityEvent;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /v1/me/player/recently-played` response body
#[derive(Debug, Deserialize)]
pub(crate) struct RecentlyPlayedPage {
    pub items: Vec<PlayHistoryItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayHistoryItem {
    pub track: Track,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Track {
    pub uri: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Missing or `null` for local files
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExternalIds {
    pub isrc: Option<String>,
}

/// `{"error": {"status": 401, "message": "..."}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub message: String,
}

impl PlayHistoryItem {
    /// Content is keyed by ISRC; local files and some podcasts have none, so
    /// those fall back to the Spotify URI.
    pub(crate) fn into_event(self) -> ActivityEvent {
        let isrc = self.track.external_ids.and_then(|ids| ids.isrc);
        let content_id = match isrc {
            Some(isrc) if !isrc.trim().is_empty() => isrc,
            _ => self.track.uri,
        };

        let event = ActivityEvent::new(content_id, self.played_at);
        match self.track.name {
            Some(name) => event.with_title(name),
            None => event,
        }
    }
}
