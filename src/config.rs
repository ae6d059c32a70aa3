use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const CONFIG_PATH: &str = "Config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub remote: RemoteConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
    #[serde(skip)]
    pub source: ConfigSource,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_ms: u64,
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    #[default]
    Defaults,
    File(String),
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = config_path.as_ref();
        let mut config = if path.exists() {
            let display = path.display().to_string();
            let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: display.clone(),
                source,
            })?;
            let mut parsed: AppConfig =
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: display.clone(),
                    source,
                })?;
            if parsed.polling.interval_ms == 0 {
                return Err(ConfigError::Invalid {
                    path: display,
                    reason: "polling.interval_ms must be at least 1",
                });
            }
            parsed.source = ConfigSource::File(display);
            parsed
        } else {
            Self::default()
        };

        config.merge_env();
        Ok(config)
    }

    /// Logs the effective settings. Call once logging is up.
    pub fn log_summary(&self) {
        match &self.source {
            ConfigSource::File(path) => tracing::info!(path = %path, "loaded configuration"),
            ConfigSource::Defaults => tracing::info!("{CONFIG_PATH} not found, using defaults"),
        }
        tracing::info!(
            remote = %self.remote.base_url,
            poll_interval_ms = self.polling.interval_ms,
            log_filter = %self.logging.filter,
            "client configuration"
        );
    }

    fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("OTHELLO_REMOTE_BASE_URL") {
            if !val.trim().is_empty() {
                self.remote.base_url = val.trim().to_string();
            }
        }
        if let Ok(val) = std::env::var("OTHELLO_POLL_INTERVAL_MS") {
            if let Ok(ms @ 1..) = val.parse::<u64>() {
                self.polling.interval_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("OTHELLO_LOG_FILTER") {
            if !val.trim().is_empty() {
                self.logging.filter = val.trim().to_string();
            }
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_ms: 500 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "othello_client=info".to_string(),
        }
    }
}
