pub mod source_error;

use crate::{ActivityEvent, OAuthToken, Provider, SourceResult};

use async_trait::async_trait;

/// Remote listening history for one provider.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Provider tag recorded on every listen fetched from this source.
    fn provider(&self) -> Provider;

    /// Fetch at most `limit` events strictly after `after_epoch_millis`,
    /// newest first. `None` fetches the most recent page.
    async fn fetch_recent_activity(
        &self,
        credentials: &OAuthToken,
        after_epoch_millis: Option<i64>,
        limit: u32,
    ) -> SourceResult<Vec<ActivityEvent>>;
}
