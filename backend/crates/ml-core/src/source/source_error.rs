use crate::ErrorLocation;

use std::error::Error as StdError;
use std::panic::Location;

use thiserror::Error;

/// Failures reported by an activity source.
///
/// The variants keep permanent failures (rejected credentials) apart from
/// transient ones so callers can treat them differently.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Credentials rejected (status {status}): {message} {location}")]
    Unauthorized {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Rate limited (retry after {retry_after_secs:?}s) {location}")]
    RateLimited {
        retry_after_secs: Option<u64>,
        location: ErrorLocation,
    },

    #[error("Unexpected status {status}: {message} {location}")]
    Status {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP transport error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Failed to decode response: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl SourceError {
    #[track_caller]
    pub fn unauthorized(status: u16, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rate_limited(retry_after_secs: Option<u64>) -> Self {
        Self::RateLimited {
            retry_after_secs,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn http<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Http {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: Box::new(source),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Retrying with the same credentials cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The same request may succeed later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Http { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Unauthorized { .. } | Self::Decode { .. } => false,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::RateLimited { .. } => "rate_limited",
            Self::Status { .. } => "status",
            Self::Http { .. } => "http",
            Self::Decode { .. } => "decode",
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
