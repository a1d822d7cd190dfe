use crate::MAX_PAGE_SIZE;
use crate::recently_played::{ErrorBody, RecentlyPlayedPage};

use ml_core::{ActivityEvent, ActivitySource, OAuthToken, Provider, SourceError, SourceResult};

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use log::{debug, warn};
use reqwest::{Client as ReqwestClient, StatusCode, header};
use tracing::instrument;

const RECENTLY_PLAYED_PATH: &str = "/v1/me/player/recently-played";

/// Reads listening history from the Spotify Web API.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    base_url: String,
    client: ReqwestClient,
}

impl SpotifyClient {
    /// # Arguments
    /// * `base_url` - API root without `/v1` (e.g. "https://api.spotify.com")
    /// * `request_timeout` - Upper bound for a single request
    #[track_caller]
    pub fn new(base_url: &str, request_timeout: Duration) -> SourceResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(request_timeout)
            .user_agent(concat!("mootslive/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SourceError::http)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub(crate) fn error_for_status(status: StatusCode, retry_after: Option<u64>, body: &str) -> SourceError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| body.chars().take(200).collect());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SourceError::unauthorized(status.as_u16(), message)
            }
            StatusCode::TOO_MANY_REQUESTS => SourceError::rate_limited(retry_after),
            _ => SourceError::status(status.as_u16(), message),
        }
    }
}

#[async_trait]
impl ActivitySource for SpotifyClient {
    fn provider(&self) -> Provider {
        Provider::Spotify
    }

    #[instrument(skip(self, credentials))]
    async fn fetch_recent_activity(
        &self,
        credentials: &OAuthToken,
        after_epoch_millis: Option<i64>,
        limit: u32,
    ) -> SourceResult<Vec<ActivityEvent>> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let mut url = format!("{}{}?limit={}", self.base_url, RECENTLY_PLAYED_PATH, limit);
        if let Some(after) = after_epoch_millis {
            url.push_str(&format!("&after={after}"));
        }

        let response = self
            .client
            .get(url)
            .bearer_auth(&credentials.access_token)
            .send()
            .await
            .map_err(SourceError::http)?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response.text().await.map_err(SourceError::http)?;

        if !status.is_success() {
            return Err(Self::error_for_status(status, retry_after, &body));
        }

        let page: RecentlyPlayedPage = serde_json::from_str(&body)
            .map_err(|e| SourceError::decode(format!("recently played page: {e}")))?;

        let fetched = page.items.len();
        let after = after_epoch_millis.and_then(DateTime::from_timestamp_millis);
        let events: Vec<ActivityEvent> = page
            .items
            .into_iter()
            .map(|item| item.into_event())
            .filter(|event| after.is_none_or(|after| event.occurred_at > after))
            .take(limit as usize)
            .collect();

        if events.len() < fetched {
            warn!(
                "Spotify returned {} items outside the requested window, dropped",
                fetched - events.len()
            );
        }
        debug!("Fetched {} recently played items", events.len());

        Ok(events)
    }
}
