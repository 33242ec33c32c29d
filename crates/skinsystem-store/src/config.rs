//! Configuration for storage backends.

use serde::Deserialize;
use skinsystem_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables read by [`StorageSettings::load`].
pub const ENV_PREFIX: &str = "STORAGE";

/// Configuration for the Redis backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Server host name.
    pub host: Option<String>,
    /// Server port.
    pub port: Option<u16>,
    /// Number of connections. `<= 1` keeps a single persistent connection.
    pub pool_size: usize,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: Some(6379),
            pool_size: 10,
        }
    }
}

impl RedisConfig {
    /// Create a config for a host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: Some(host.into()),
            port: Some(port),
            ..Default::default()
        }
    }

    /// Set the server host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the server port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the number of pooled connections.
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Check required parameters are present.
    pub fn validate(&self) -> Result<()> {
        if self.host.as_deref().is_none_or(str::is_empty) {
            return Err(Error::ParamRequired("host"));
        }

        if self.port.is_none_or(|port| port == 0) {
            return Err(Error::ParamRequired("port"));
        }

        Ok(())
    }

    /// Connection URL. Fails the same way as [`RedisConfig::validate`].
    pub fn url(&self) -> Result<String> {
        self.validate()?;
        let host = self.host.as_deref().unwrap_or_default();
        let port = self.port.unwrap_or_default();
        Ok(format!("redis://{}:{}/", host, port))
    }

    /// Number of connection slots to open.
    pub fn slots(&self) -> usize {
        self.pool_size.max(1)
    }
}

/// Configuration for the filesystem cape storage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilesystemConfig {
    /// Directory holding `<username>.png` files.
    pub base_path: Option<PathBuf>,
}

impl FilesystemConfig {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    /// Base directory, or `ParamRequired` when missing.
    pub fn base_path(&self) -> Result<&Path> {
        match self.base_path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(Error::ParamRequired("base_path")),
        }
    }
}

/// All storage settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub redis: RedisConfig,
    pub filesystem: FilesystemConfig,
}

impl StorageSettings {
    /// Load settings from an optional file, overridden by `STORAGE_*`
    /// environment variables (`STORAGE_REDIS__HOST`, `STORAGE_REDIS__POOL_SIZE`,
    /// `STORAGE_FILESYSTEM__BASE_PATH`, ...).
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with(file, environment())
    }

    fn load_with(file: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(env)
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| Error::Config(e.to_string()))
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
