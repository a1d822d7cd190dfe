use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Corrupt {column} in row {row_id}: {message} {location}")]
    Decode {
        column: &'static str,
        row_id: String,
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub fn decode(column: &'static str, row_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column,
            row_id: row_id.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The connection behind a transaction is already gone, so the
    /// transaction cannot be holding anything anymore.
    pub fn is_connection_closed(&self) -> bool {
        matches!(
            self,
            Self::Sqlx {
                source: sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed,
                ..
            }
        )
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
