use std::str::FromStr;

use serde::Deserialize;

/// What a sweep does when one account's scan fails.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SweepPolicy {
    /// Abort the sweep and stop the poller with the scan error.
    #[default]
    FailFast,
    /// Log the failure and carry on with the remaining accounts.
    ContinueOnError,
}

impl SweepPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailFast => "fail_fast",
            Self::ContinueOnError => "continue_on_error",
        }
    }
}

impl FromStr for SweepPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail_fast" => Ok(Self::FailFast),
            "continue_on_error" => Ok(Self::ContinueOnError),
            _ => Err(()),
        }
    }
}
