mod config;
mod cursor_strategy;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod poller_config;
mod spotify_config;
mod sweep_policy;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use cursor_strategy::CursorStrategy;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use poller_config::PollerConfig;
pub use spotify_config::SpotifyConfig;
pub use sweep_policy::SweepPolicy;

const CONFIG_DIR_ENV: &str = "ML_CONFIG_DIR";
const DEFAULT_CONFIG_DIRECTORY: &str = ".mootslive";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_DATABASE_FILENAME: &str = "mootslive.db";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_SPOTIFY_API_BASE_URL: &str = "https://api.spotify.com";
