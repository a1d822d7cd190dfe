use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PollerError {
    #[error("Config error: {0}")]
    Config(#[from] ml_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] ml_db::DbError),

    #[error("Ingestion error: {0}")]
    Ingest(#[from] ml_ingest::IngestError),

    #[error("Spotify client error: {0}")]
    Source(#[from] ml_core::SourceError),

    #[error("Invalid credentials: {0}")]
    Credentials(#[from] ml_core::CoreError),

    #[error("Failed to read {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Spotify account {spotify_user_id} is already linked {location}")]
    AlreadyLinked {
        spotify_user_id: String,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

impl PollerError {
    #[track_caller]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_linked(spotify_user_id: impl Into<String>) -> Self {
        Self::AlreadyLinked {
            spotify_user_id: spotify_user_id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PollerError>;
