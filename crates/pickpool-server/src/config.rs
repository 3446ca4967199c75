//! Configuration loading and typed config structures for the pick pool server.
//!
//! The configuration lives in `pickpool-config.yaml` in the working
//! directory. Every key is optional; a missing file means all defaults.
//! A few environment variables are applied on top after parsing.

use std::path::{Path, PathBuf};

use pickpool_store::{DEFAULT_FILE_NAME, StorageLocation};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override had an unusable value.
    #[error("invalid value for {var}: {value}")]
    Env {
        /// The environment variable.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
///
/// Mirrors the structure of `pickpool-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PoolConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Where win counts are stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Optional catalog and roster files.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PoolConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Env`] if an override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply environment overrides.
    ///
    /// # Errors
    ///
    /// See [`PoolConfig::from_file`].
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// See [`PoolConfig::apply_overrides`].
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides looked up through `lookup`:
    /// - `POOL_HOST` overrides `server.host`
    /// - `POOL_PORT` overrides `server.port`
    /// - `POOL_STORAGE_MODE` overrides `storage.mode`
    /// - `POOL_EPHEMERAL=1` (or `true`) forces ephemeral storage
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if a port or storage mode cannot be parsed.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(host) = lookup("POOL_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("POOL_PORT") {
            self.server.port = port.trim().parse().map_err(|e| {
                tracing::debug!(error = %e, "POOL_PORT rejected");
                ConfigError::Env {
                    var: "POOL_PORT",
                    value: port.clone(),
                }
            })?;
        }
        if let Some(mode) = lookup("POOL_STORAGE_MODE") {
            self.storage.mode = StorageMode::parse(&mode).ok_or(ConfigError::Env {
                var: "POOL_STORAGE_MODE",
                value: mode,
            })?;
        }
        if lookup("POOL_EPHEMERAL").is_some_and(|v| matches!(v.trim(), "1" | "true")) {
            self.storage.mode = StorageMode::Ephemeral;
        }
        Ok(())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Which storage strategy to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Project data directory, survives restarts.
    #[default]
    Persistent,
    /// Per-instance scratch directory.
    Ephemeral,
}

impl StorageMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "persistent" => Some(Self::Persistent),
            "ephemeral" => Some(Self::Ephemeral),
            _ => None,
        }
    }
}

/// Win-count storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Persistent or ephemeral.
    #[serde(default)]
    pub mode: StorageMode,

    /// Directory used in persistent mode.
    #[serde(default = "default_persistent_dir")]
    pub persistent_dir: PathBuf,

    /// Directory used in ephemeral mode. Defaults to the OS temp dir.
    #[serde(default)]
    pub ephemeral_dir: Option<PathBuf>,

    /// Snapshot file name inside the chosen directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Read-only snapshot used to seed a missing ephemeral store.
    #[serde(default = "default_bundled_snapshot")]
    pub bundled_snapshot: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mode: StorageMode::default(),
            persistent_dir: default_persistent_dir(),
            ephemeral_dir: None,
            file_name: default_file_name(),
            bundled_snapshot: default_bundled_snapshot(),
        }
    }
}

impl StorageConfig {
    /// Resolve the configured mode into a concrete location.
    pub fn location(&self) -> StorageLocation {
        match self.mode {
            StorageMode::Persistent => StorageLocation::persistent(&self.persistent_dir),
            StorageMode::Ephemeral => self
                .ephemeral_dir
                .as_ref()
                .map_or_else(StorageLocation::system_temp, StorageLocation::ephemeral),
        }
    }
}

/// Optional replacement catalog and roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// YAML file with a `teams:` list. Built-in catalog when absent.
    #[serde(default)]
    pub teams_file: Option<PathBuf>,

    /// YAML file with a `participants:` list. Built-in roster when absent.
    #[serde(default)]
    pub participants_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_persistent_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_file_name() -> String {
    String::from(DEFAULT_FILE_NAME)
}

#[allow(clippy::unnecessary_wraps)]
fn default_bundled_snapshot() -> Option<PathBuf> {
    Some(PathBuf::from("data").join(DEFAULT_FILE_NAME))
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::BTreeMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = PoolConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.mode, StorageMode::Persistent);
        assert_eq!(config.storage.file_name, "teamData.json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.catalog.teams_file.is_none());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
server:
  host: 127.0.0.1
  port: 3000
storage:
  mode: ephemeral
  persistent_dir: /srv/pool
  ephemeral_dir: /tmp/pool
  file_name: wins.json
  bundled_snapshot: seed/wins.json
catalog:
  teams_file: teams.yaml
  participants_file: picks.yaml
logging:
  level: debug
  format: json
";
        let config = PoolConfig::parse_without_env(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.mode, StorageMode::Ephemeral);
        assert_eq!(config.storage.file_name, "wins.json");
        assert_eq!(config.storage.bundled_snapshot, Some(PathBuf::from("seed/wins.json")));
        assert_eq!(config.catalog.participants_file, Some(PathBuf::from("picks.yaml")));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.storage.location(),
            StorageLocation::ephemeral("/tmp/pool")
        );
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = PoolConfig::parse_without_env("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        // Everything else uses defaults
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(PoolConfig::parse_without_env("").is_ok());
    }

    #[test]
    fn unknown_storage_mode_is_rejected() {
        assert!(PoolConfig::parse_without_env("storage:\n  mode: cloud\n").is_err());
    }

    #[test]
    fn persistent_location_uses_data_dir() {
        let storage = StorageConfig::default();
        assert_eq!(storage.location(), StorageLocation::persistent("data"));
    }

    #[test]
    fn ephemeral_without_dir_uses_system_temp() {
        let storage = StorageConfig {
            mode: StorageMode::Ephemeral,
            ..StorageConfig::default()
        };
        assert_eq!(storage.location(), StorageLocation::system_temp());
    }

    #[test]
    fn env_overrides_server_and_mode() {
        let mut config = PoolConfig::default();
        config
            .apply_overrides(env(&[
                ("POOL_HOST", "127.0.0.1"),
                ("POOL_PORT", "9999"),
                ("POOL_STORAGE_MODE", "Ephemeral"),
            ]))
            .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.storage.mode, StorageMode::Ephemeral);
    }

    #[test]
    fn ephemeral_hint_forces_ephemeral() {
        let mut config = PoolConfig::default();
        config
            .apply_overrides(env(&[("POOL_STORAGE_MODE", "persistent"), ("POOL_EPHEMERAL", "1")]))
            .unwrap();
        assert_eq!(config.storage.mode, StorageMode::Ephemeral);

        let mut config = PoolConfig::default();
        config.apply_overrides(env(&[("POOL_EPHEMERAL", "0")])).unwrap();
        assert_eq!(config.storage.mode, StorageMode::Persistent);
    }

    #[test]
    fn bad_port_override_is_an_error() {
        let mut config = PoolConfig::default();
        let err = config.apply_overrides(env(&[("POOL_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "POOL_PORT", .. }));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("pickpool-config.yaml");
        if path.exists() {
            let config = PoolConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
