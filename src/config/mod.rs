//! Service configuration: JSON file defaults layered under environment overrides.

use std::{
    env, fmt, fs,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::errors::{BudgetError, Result};
use crate::utils::default_data_dir;

pub const CONFIG_PATH_VAR: &str = "BUDGET_TRACKER_CONFIG";
pub const DATA_DIR_VAR: &str = "BUDGET_TRACKER_DATA_DIR";
pub const STORAGE_VAR: &str = "BUDGET_TRACKER_STORAGE";
pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

/// Persistence backend used by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Json,
    Memory,
}

impl FromStr for StorageKind {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageKind::Json),
            "memory" => Ok(StorageKind::Memory),
            other => Err(BudgetError::ConfigError(format!(
                "unknown storage backend `{}`",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StorageKind::Json => "json",
            StorageKind::Memory => "memory",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "AppConfig::default_host")]
    pub host: IpAddr,
    #[serde(default = "AppConfig::default_port")]
    pub port: u16,
    #[serde(default = "AppConfig::default_environment")]
    pub environment: String,
    #[serde(default)]
    pub storage: StorageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory for the JSON collections. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            environment: Self::default_environment(),
            storage: StorageKind::default(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub fn default_host() -> IpAddr {
        IpAddr::from([127, 0, 0, 1])
    }

    pub fn default_port() -> u16 {
        5000
    }

    pub fn default_environment() -> String {
        "development".into()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Applies overrides from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_VAR) {
            self.host = parse_value(HOST_VAR, &host)?;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.port = parse_value(PORT_VAR, &port)?;
        }
        if let Some(environment) = lookup(ENVIRONMENT_VAR) {
            self.environment = environment;
        }
        if let Some(storage) = lookup(STORAGE_VAR) {
            self.storage = storage.parse()?;
        }
        if let Some(dir) = lookup(DATA_DIR_VAR) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }
}

/// Loads [`AppConfig`] from an optional file plus the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Reads the config file location from `BUDGET_TRACKER_CONFIG`.
    pub fn from_env() -> Self {
        Self::new(env::var_os(CONFIG_PATH_VAR).map(PathBuf::from))
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// File values (or defaults when no file is configured), without overrides.
    pub fn load_file(&self) -> Result<AppConfig> {
        let Some(path) = &self.config_path else {
            return Ok(AppConfig::default());
        };
        let data = fs::read_to_string(path).map_err(|err| {
            BudgetError::ConfigError(format!("cannot read `{}`: {}", path.display(), err))
        })?;
        serde_json::from_str(&data).map_err(|err| {
            BudgetError::ConfigError(format!("cannot parse `{}`: {}", path.display(), err))
        })
    }

    pub fn load(&self) -> Result<AppConfig> {
        let mut config = self.load_file()?;
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err| BudgetError::ConfigError(format!("invalid {}=`{}`: {}", key, raw, err)))
}
