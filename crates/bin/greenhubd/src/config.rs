//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `greenhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use greenhub_domain::id::GreenhouseKey;
use greenhub_domain::registry::Registry;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Durable storage settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// The fixed greenhouse plot set.
    pub greenhouses: GreenhousesConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// JSON document storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the persisted documents.
    pub data_dir: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// The plot set is fixed at startup: `count` plots keyed `solar0` through
/// `solarN-1`, optionally with explicit labels.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GreenhousesConfig {
    /// Number of plots.
    pub count: usize,
    /// Optional per-plot labels; missing positions get `Solar N`.
    pub labels: Vec<String>,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),

    /// The config file exists but is not valid TOML.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),

    /// A field value is out of range.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from `greenhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("greenhub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GREENHUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("GREENHUB_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("GREENHUB_DATA_DIR") {
            self.storage.data_dir = val;
        }
        if let Ok(val) = std::env::var("GREENHUB_PLOTS") {
            if let Ok(count) = val.parse() {
                self.greenhouses.count = count;
            }
        }
        if let Ok(val) = std::env::var("GREENHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.greenhouses.count == 0 {
            return Err(ConfigError::Validation(
                "greenhouse count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build the default registry from the configured plot set.
    #[must_use]
    pub fn registry(&self) -> Registry {
        Registry::new((0..self.greenhouses.count).map(|i| {
            let label = self
                .greenhouses
                .labels
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Solar {}", i + 1));
            (GreenhouseKey::new(format!("solar{i}")), label)
        }))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Default for GreenhousesConfig {
    fn default() -> Self {
        Self {
            count: 4,
            labels: Vec::new(),
        }
    }
}
