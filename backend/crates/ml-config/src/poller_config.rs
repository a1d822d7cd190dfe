use crate::{ConfigError, ConfigErrorResult, CursorStrategy, SweepPolicy};

use serde::Deserialize;

pub const MIN_INTERVAL_SECS: u64 = 1;
pub const MAX_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_INTERVAL_SECS: u64 = 10;

// Spotify caps recently-played pages at 50 items.
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 50;
pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Delay between sweeps in seconds
    pub interval_secs: u64,
    /// Events requested per scan
    pub page_size: u32,
    pub sweep_policy: SweepPolicy,
    pub cursor_strategy: CursorStrategy,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            sweep_policy: SweepPolicy::default(),
            cursor_strategy: CursorStrategy::default(),
        }
    }
}

impl PollerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.interval_secs < MIN_INTERVAL_SECS || self.interval_secs > MAX_INTERVAL_SECS {
            return Err(ConfigError::poller(format!(
                "poller.interval_secs must be {}-{}, got {}",
                MIN_INTERVAL_SECS, MAX_INTERVAL_SECS, self.interval_secs
            )));
        }

        if self.page_size < MIN_PAGE_SIZE || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::poller(format!(
                "poller.page_size must be {}-{}, got {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE, self.page_size
            )));
        }

        Ok(())
    }
}
