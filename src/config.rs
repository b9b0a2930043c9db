//! Client configuration: relay endpoint and log destination.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Production relay endpoint.
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8081/ws";

/// Environment variable that overrides the configured endpoint.
pub const SERVER_URL_ENV: &str = "STRICTLY_RELAY_URL";

/// Configuration for a relay client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// WebSocket URL of the relay.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// File the TUI writes logs to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_relay.log")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            log_file: default_log_file(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at `server_url`.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::new(format!("Failed to parse config: {}", e))
        })?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the effective configuration.
    ///
    /// Precedence for the endpoint: `cli_url`, then [`SERVER_URL_ENV`], then
    /// the config file, then [`DEFAULT_SERVER_URL`]. Call after loading
    /// `.env` so its values count as environment.
    #[instrument]
    pub fn resolve(
        cli_url: Option<String>,
        config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let file = config_path.map(|path| Self::from_file(path)).transpose()?;
        let env_url = std::env::var(SERVER_URL_ENV).ok();
        Ok(Self::resolve_with(cli_url, env_url, file))
    }

    /// Applies endpoint precedence to already-gathered sources.
    pub fn resolve_with(
        cli_url: Option<String>,
        env_url: Option<String>,
        file: Option<ClientConfig>,
    ) -> Self {
        let base = file.unwrap_or_default();
        let non_empty = |url: &String| !url.trim().is_empty();
        let server_url = cli_url
            .filter(non_empty)
            .or(env_url.filter(non_empty))
            .unwrap_or(base.server_url);

        debug!(server_url = %server_url, "Resolved relay endpoint");
        Self {
            server_url,
            log_file: base.log_file,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
