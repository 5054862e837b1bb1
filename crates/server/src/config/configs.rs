use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
    /// Mount point of the resource routes; empty mounts them at the root.
    pub api_prefix: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT as u16,
            api_prefix: defaults::DEFAULT_API_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
    pub connect_timeout_secs: u64,
    pub log_statements: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DEFAULT_DB_URL.to_string(),
            max_connections: defaults::DEFAULT_DB_MAX_CONNECTIONS as u32,
            min_idle: defaults::DEFAULT_DB_MIN_IDLE as u32,
            connect_timeout_secs: defaults::DEFAULT_DB_CONNECT_TIMEOUT_SECS as u64,
            log_statements: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Comma separated list of origins; `*` allows any origin.
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn allows_any(&self) -> bool {
        self.origins().iter().any(|origin| origin == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: defaults::DEFAULT_CORS_ALLOWED_ORIGINS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, CorsConfig};

    #[test]
    fn defaults_point_at_local_sqlite() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.general.port, 8000);
        assert_eq!(cfg.general.api_prefix, "/api");
        assert!(cfg.database.url.starts_with("sqlite://"));
        assert!(cfg.database.min_idle <= cfg.database.max_connections);
    }

    #[test]
    fn cors_origins_split_and_trim() {
        let cors = CorsConfig {
            allowed_origins: " http://a.test , ,http://b.test".to_string(),
        };

        assert_eq!(cors.origins(), vec!["http://a.test", "http://b.test"]);
        assert!(!cors.allows_any());
    }

    #[test]
    fn cors_wildcard_is_detected() {
        let cors = CorsConfig {
            allowed_origins: "*".to_string(),
        };

        assert!(cors.allows_any());
    }
}
