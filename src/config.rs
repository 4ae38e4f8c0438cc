//! Service configuration
//!
//! Loaded from a JSON file; `DATABASE_URL` and `JOBLY_SECRET_KEY` in the
//! environment take precedence over the file.

use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::auth::{JwtConfig, DEFAULT_SECRET};
use crate::http_server::HttpServerConfig;

/// Environment override for [`Config::database_url`]
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment override for [`AuthConfig::secret`]
pub const SECRET_KEY_ENV: &str = "JOBLY_SECRET_KEY";

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Postgres connection string
    #[serde(default)]
    pub database_url: String,

    /// Pool size (default 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Token settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_secret")]
    pub secret: String,

    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,

    #[serde(default = "default_issuer")]
    pub issuer: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_secret() -> String {
    JwtConfig::default().secret
}

fn default_token_ttl_minutes() -> i64 {
    24 * 60
}

fn default_issuer() -> String {
    JwtConfig::default().issuer
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            token_ttl_minutes: default_token_ttl_minutes(),
            issuer: default_issuer(),
        }
    }
}

impl AuthConfig {
    /// Tokens signed with the placeholder key are forgeable by anyone
    pub fn require_custom_secret(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() || self.secret == DEFAULT_SECRET {
            return Err(ConfigError::DefaultSecret);
        }
        Ok(())
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.secret.clone(),
            token_ttl: Duration::minutes(self.token_ttl_minutes),
            issuer: self.issuer.clone(),
        }
    }
}

/// Configuration loading failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("database_url is not set (config file or {})", DATABASE_URL_ENV)]
    MissingDatabaseUrl,

    #[error("auth.secret is still the default (set it in the config file or {})", SECRET_KEY_ENV)]
    DefaultSecret,
}

impl Config {
    /// Read the file, apply environment overrides and require a database URL
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::resolve(path)?;
        if config.database_url.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(config)
    }

    /// Read the file and apply environment overrides
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(
            std::env::var(DATABASE_URL_ENV).ok(),
            std::env::var(SECRET_KEY_ENV).ok(),
        );
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Non-empty overrides replace file values
    pub fn apply_overrides(&mut self, database_url: Option<String>, secret: Option<String>) {
        if let Some(url) = database_url.filter(|s| !s.is_empty()) {
            self.database_url = url;
        }
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            self.auth.secret = secret;
        }
    }
}
