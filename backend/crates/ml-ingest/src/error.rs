use ml_core::SourceError;
use ml_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Store error: {source} {location}")]
    Store {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Activity source failed for account {account_id}: {source} {location}")]
    Source {
        account_id: String,
        #[source]
        source: SourceError,
        location: ErrorLocation,
    },

    #[error("Account not found: {account_id} {location}")]
    AccountNotFound {
        account_id: String,
        location: ErrorLocation,
    },

    #[error("Poller cancelled {location}")]
    Cancelled { location: ErrorLocation },
}

impl IngestError {
    #[track_caller]
    pub fn source_failed(account_id: impl Into<String>, source: SourceError) -> Self {
        Self::Source {
            account_id: account_id.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn account_not_found(account_id: impl Into<String>) -> Self {
        Self::AccountNotFound {
            account_id: account_id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn cancelled() -> Self {
        Self::Cancelled {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Store { .. } => "store",
            Self::Source { source, .. } => source.kind(),
            Self::AccountNotFound { .. } => "account_not_found",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

impl From<DbError> for IngestError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
