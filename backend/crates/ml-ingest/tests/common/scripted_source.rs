use ml_core::{ActivityEvent, ActivitySource, OAuthToken, Provider, SourceError, SourceResult};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

/// One recorded `fetch_recent_activity` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub access_token: String,
    pub after_epoch_millis: Option<i64>,
    pub limit: u32,
}

/// Pauses the first fetch until released.
#[derive(Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[derive(Default)]
struct State {
    responses: VecDeque<SourceResult<Vec<ActivityEvent>>>,
    calls: Vec<FetchCall>,
    gate: Option<Gate>,
}

/// Activity source that replays queued responses in order, then empty pages.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    state: Arc<Mutex<State>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch(self, events: Vec<ActivityEvent>) -> Self {
        self.push(Ok(events));
        self
    }

    pub fn with_failure(self) -> Self {
        self.push(Err(SourceError::status(503, "scripted outage")));
        self
    }

    pub fn with_gate(self, gate: Gate) -> Self {
        self.state.lock().unwrap().gate = Some(gate);
        self
    }

    pub fn push(&self, response: SourceResult<Vec<ActivityEvent>>) {
        self.state.lock().unwrap().responses.push_back(response);
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn afters(&self) -> Vec<Option<i64>> {
        self.calls().into_iter().map(|c| c.after_epoch_millis).collect()
    }
}

#[async_trait]
impl ActivitySource for ScriptedSource {
    fn provider(&self) -> Provider {
        Provider::Spotify
    }

    async fn fetch_recent_activity(
        &self,
        credentials: &OAuthToken,
        after_epoch_millis: Option<i64>,
        limit: u32,
    ) -> SourceResult<Vec<ActivityEvent>> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(FetchCall {
                access_token: credentials.access_token.clone(),
                after_epoch_millis,
                limit,
            });
            state.gate.take()
        };

        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.state
            .lock()
            .unwrap()
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
