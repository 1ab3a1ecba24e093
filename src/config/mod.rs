//! Configuration management.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults ([`ServerConfig::default`])
//! 2. A TOML file ([`ServerConfig::load_from_file`] / [`ServerConfig::load_default`])
//! 3. Environment variables ([`ServerConfig::apply_env_overrides`])
//! 4. Command-line flags (applied by the binary)
//!
//! The resulting value is passed to the server constructor; there is no
//! process-wide configuration object.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Default `SQLite` database path, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "books.db";

/// Prefix of every environment variable read by [`ServerConfig::apply_env_overrides`].
pub const ENV_PREFIX: &str = "DISTANT_READING_";

/// Which catalog backend to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogKind {
    /// The fixed in-memory catalog; lookups by `id` only.
    #[default]
    Memory,
    /// A `books` table in an `SQLite` database; lookups by `id`, `published`
    /// and `author`.
    Sqlite,
}

impl CatalogKind {
    /// Parses a catalog kind, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Some(Self::Memory),
            "sqlite" | "db" => Some(Self::Sqlite),
            _ => None,
        }
    }

    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main configuration for the catalog server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub addr: SocketAddr,
    /// Catalog backend to serve.
    pub catalog: CatalogKind,
    /// Database file for [`CatalogKind::Sqlite`].
    pub database: PathBuf,
    /// Logging and metrics settings.
    pub observability: ObservabilitySettings,
}

/// Observability section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilitySettings {
    /// Logging settings.
    pub logging: Option<LoggingSettings>,
    /// Metrics settings.
    pub metrics: Option<MetricsSettings>,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Filter directive, e.g. `info` or `distant_reading=debug`.
    pub level: Option<String>,
    /// Log to this file instead of stderr.
    pub file: Option<String>,
}

/// Metrics settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSettings {
    /// Whether to expose Prometheus metrics.
    pub enabled: Option<bool>,
    /// Port for the Prometheus listener.
    pub port: Option<u16>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Listen address.
    pub addr: Option<String>,
    /// Catalog kind.
    pub catalog: Option<String>,
    /// Database path.
    pub database: Option<String>,
    /// Observability section.
    pub observability: Option<ObservabilitySettings>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            catalog: CatalogKind::default(),
            database: PathBuf::from(DEFAULT_DATABASE),
            observability: ObservabilitySettings::default(),
        }
    }
}

impl ServerConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds an
    /// invalid value.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or holds an invalid value.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks `<platform config dir>/distant-reading/config.toml`. Returns
    /// default configuration if there is no such file or it cannot be used.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let path = base_dirs
            .config_dir()
            .join("distant-reading")
            .join("config.toml");
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unusable config file");
                Self::default()
            },
        }
    }

    /// Converts a `ConfigFile` to `ServerConfig`.
    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = file.addr {
            config.addr = parse_addr(&addr)?;
        }
        if let Some(catalog) = file.catalog {
            config.catalog = parse_catalog(&catalog)?;
        }
        if let Some(database) = file.database {
            config.database = PathBuf::from(database);
        }
        if let Some(observability) = file.observability {
            config.observability = observability;
        }

        Ok(config)
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`.
    ///
    /// `lookup` receives full variable names such as `DISTANT_READING_ADDR`.
    /// Empty values are ignored.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `DISTANT_READING_ADDR` | `addr` |
    /// | `DISTANT_READING_CATALOG` | `catalog` |
    /// | `DISTANT_READING_DB` | `database` |
    /// | `DISTANT_READING_LOG_FORMAT` | `observability.logging.format` |
    /// | `DISTANT_READING_LOG_LEVEL` | `observability.logging.level` |
    /// | `DISTANT_READING_LOG_FILE` | `observability.logging.file` |
    /// | `DISTANT_READING_METRICS_ENABLED` | `observability.metrics.enabled` |
    /// | `DISTANT_READING_METRICS_PORT` | `observability.metrics.port` |
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn apply_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}")).filter(|v| !v.trim().is_empty())
        };

        if let Some(addr) = get("ADDR") {
            self.addr = parse_addr(&addr)?;
        }
        if let Some(catalog) = get("CATALOG") {
            self.catalog = parse_catalog(&catalog)?;
        }
        if let Some(database) = get("DB") {
            self.database = PathBuf::from(database);
        }

        let logging = self.observability.logging.get_or_insert_with(LoggingSettings::default);
        if let Some(format) = get("LOG_FORMAT") {
            logging.format = Some(format);
        }
        if let Some(level) = get("LOG_LEVEL") {
            logging.level = Some(level);
        }
        if let Some(file) = get("LOG_FILE") {
            logging.file = Some(file);
        }

        let metrics = self.observability.metrics.get_or_insert_with(MetricsSettings::default);
        if let Some(enabled) = get("METRICS_ENABLED") {
            metrics.enabled = Some(parse_bool(&enabled).ok_or_else(|| {
                Error::InvalidInput(format!("{ENV_PREFIX}METRICS_ENABLED: not a boolean: {enabled}"))
            })?);
        }
        if let Some(port) = get("METRICS_PORT") {
            metrics.port = Some(port.trim().parse().map_err(|_| {
                Error::InvalidInput(format!("{ENV_PREFIX}METRICS_PORT: not a port: {port}"))
            })?);
        }

        Ok(self)
    }

    /// Sets the listen address.
    #[must_use]
    pub const fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Sets the catalog kind.
    #[must_use]
    pub const fn with_catalog(mut self, catalog: CatalogKind) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = path.into();
        self
    }

    /// Renders the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        let file = ConfigFile {
            addr: Some(self.addr.to_string()),
            catalog: Some(self.catalog.to_string()),
            database: Some(self.database.display().to_string()),
            observability: Some(self.observability.clone()),
        };

        toml::to_string_pretty(&file).map_err(|e| Error::OperationFailed {
            operation: "serialize_config".to_string(),
            cause: e.to_string(),
        })
    }
}

/// Parses a listen address.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `s` is not `host:port`.
pub fn parse_addr(s: &str) -> Result<SocketAddr> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("not a socket address: {s}")))
}

/// Parses a catalog kind.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for anything but `memory` or `sqlite`.
pub fn parse_catalog(s: &str) -> Result<CatalogKind> {
    CatalogKind::parse(s)
        .ok_or_else(|| Error::InvalidInput(format!("unknown catalog '{s}' (expected memory or sqlite)")))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
