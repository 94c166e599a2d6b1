//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables. Command-line overrides are applied last by the CLI
//! layer before [`Config::validate`] runs.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_DATABASE_PATH,
    DEFAULT_HOST, DEFAULT_PORT, ENV_DATABASE, ENV_HOST, ENV_PORT,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1" or "0.0.0.0"
    pub host: String,

    /// TCP port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Listen address in `host:port` form; host names are resolved at bind time
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dataset connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite dataset file
    pub path: PathBuf,

    /// Maximum pooled read connections
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection before failing a request
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_connections: num_cpus::get() as u32,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

/// Global configuration for the climate API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl Config {
    /// Default configuration file location, `<config dir>/climate-api/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("could not determine user config directory"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("cannot read config file '{}'", path.display()), e)
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load defaults, then the config file if given, then the environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading config file {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides through a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATABASE) {
            debug!("{} overrides database path", ENV_DATABASE);
            self.database.path = PathBuf::from(path);
        }
        if let Some(host) = lookup(ENV_HOST) {
            debug!("{} overrides host", ENV_HOST);
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| {
                Error::configuration(format!("{} must be a port number, got '{}'", ENV_PORT, port))
            })?;
        }
        Ok(())
    }

    /// Check the configuration for values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::configuration("server.host must not be empty"));
        }
        if self.server.port == 0 {
            return Err(Error::configuration("server.port must be non-zero"));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(Error::configuration("database.path must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(Error::configuration(
                "database.max_connections must be at least 1",
            ));
        }
        if self.database.acquire_timeout_secs == 0 {
            return Err(Error::configuration(
                "database.acquire_timeout_secs must be at least 1",
            ));
        }
        Ok(())
    }
}
