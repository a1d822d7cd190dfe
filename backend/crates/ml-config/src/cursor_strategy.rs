use std::str::FromStr;

use serde::Deserialize;

/// How a scan picks the next resume cursor from a fetched batch.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CursorStrategy {
    /// Timestamp of the first event processed. Relies on the source
    /// returning events newest first.
    #[default]
    FirstEvent,
    /// Newest timestamp anywhere in the batch.
    NewestInBatch,
}

impl CursorStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstEvent => "first_event",
            Self::NewestInBatch => "newest_in_batch",
        }
    }
}

impl FromStr for CursorStrategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_event" => Ok(Self::FirstEvent),
            "newest_in_batch" => Ok(Self::NewestInBatch),
            _ => Err(()),
        }
    }
}
