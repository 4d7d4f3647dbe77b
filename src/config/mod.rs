//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable holding the store connection string
pub const DATABASE_URL_ENV: &str = "POSTGRES_URL";
/// Environment variable overriding the listen address
pub const BIND_ADDR_ENV: &str = "DASHBOARD_BIND_ADDR";
/// Environment variable overriding the TLS mode of the store connection
pub const SSL_MODE_ENV: &str = "DASHBOARD_SSL_MODE";

/// TLS requirement for the store connection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    Disable,
    Prefer,
    #[default]
    Require,
}

impl FromStr for SslMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            other => Err(ConfigError::InvalidValue {
                field: "ssl_mode".into(),
                value: other.into(),
                message: "expected one of: disable, prefer, require".into(),
            }),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_max_connections() -> u32 {
    5
}

/// Process-wide configuration, read once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Store connection string
    #[serde(default)]
    pub database_url: Option<String>,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub ssl_mode: SslMode,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: default_bind_addr(),
            ssl_mode: SslMode::default(),
            max_connections: default_max_connections(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            database_url: lookup(DATABASE_URL_ENV).filter(|url| !url.is_empty()),
            ..Self::default()
        };
        if let Some(addr) = lookup(BIND_ADDR_ENV) {
            config.bind_addr = addr;
        }
        if let Some(mode) = lookup(SSL_MODE_ENV) {
            config.ssl_mode = mode.parse()?;
        }
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Connection string, or the fatal startup error when it is absent
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::MissingEnv(DATABASE_URL_ENV))
    }
}
