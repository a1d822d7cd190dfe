use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIRECTORY,
    DatabaseConfig, LoggingConfig, PollerConfig, SpotifyConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

/// Seconds a waiting scanner's busy timeout must exceed the request timeout by.
pub const LOCK_WAIT_MARGIN_SECS: u64 = 5;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub poller: PollerConfig,
    pub spotify: SpotifyConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for ML_CONFIG_DIR env var, else use ./.mootslive/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply ML_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: ML_CONFIG_DIR env var > ./.mootslive/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.database.validate()?;
        self.poller.validate()?;
        self.spotify.validate()?;

        // A scan holds the account's write lock across its fetch, so another
        // scanner has to be able to wait out the slowest fetch.
        let min_busy_timeout_secs = self.spotify.request_timeout_secs + LOCK_WAIT_MARGIN_SECS;
        if self.database.busy_timeout_secs < min_busy_timeout_secs {
            return Err(ConfigError::database(format!(
                "database.busy_timeout_secs must be at least spotify.request_timeout_secs + {} ({}), got {}",
                LOCK_WAIT_MARGIN_SECS, min_busy_timeout_secs, self.database.busy_timeout_secs
            )));
        }

        if let Some(ref file) = self.logging.file
            && (file.is_empty() || file.contains('/') || file.contains(".."))
        {
            return Err(ConfigError::logging(
                "logging.file must be a bare file name inside logging.dir",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Get absolute path to the log file, when file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
            None => Ok(None),
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  database: {} (max {} connections, busy timeout {}s)",
            self.database.path, self.database.max_connections, self.database.busy_timeout_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!(
            "  poller: interval={}s, page_size={}, sweep_policy={}, cursor_strategy={}",
            self.poller.interval_secs,
            self.poller.page_size,
            self.poller.sweep_policy.as_str(),
            self.poller.cursor_strategy.as_str()
        );
        info!(
            "  spotify: {} (timeout {}s)",
            self.spotify.api_base_url, self.spotify.request_timeout_secs
        );
    }

    fn apply_env_overrides(&mut self) {
        // Database
        Self::apply_env_string("ML_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "ML_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );
        Self::apply_env_parse(
            "ML_DATABASE_BUSY_TIMEOUT_SECS",
            &mut self.database.busy_timeout_secs,
        );

        // Logging
        Self::apply_env_parse("ML_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ML_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("ML_LOG_FILE", &mut self.logging.file);

        // Poller
        Self::apply_env_parse("ML_POLLER_INTERVAL_SECS", &mut self.poller.interval_secs);
        Self::apply_env_parse("ML_POLLER_PAGE_SIZE", &mut self.poller.page_size);
        Self::apply_env_parse("ML_POLLER_SWEEP_POLICY", &mut self.poller.sweep_policy);
        Self::apply_env_parse(
            "ML_POLLER_CURSOR_STRATEGY",
            &mut self.poller.cursor_strategy,
        );

        // Spotify
        Self::apply_env_string("ML_SPOTIFY_API_BASE_URL", &mut self.spotify.api_base_url);
        Self::apply_env_parse(
            "ML_SPOTIFY_REQUEST_TIMEOUT_SECS",
            &mut self.spotify.request_timeout_secs,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
