//! Configuration module for QABOARD.

use serde::Deserialize;
use std::path::Path;

use crate::{QaboardError, Result};

/// Environment variable that overrides `web.jwt_secret`.
pub const JWT_SECRET_ENV: &str = "QABOARD_JWT_SECRET";

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/qaboard.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Web session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Secret used to sign session tokens.
    #[serde(default)]
    pub jwt_secret: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_expiry")]
    pub session_expiry_secs: u64,
    /// Mark the session cookie `Secure` (enable behind HTTPS).
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_session_expiry() -> u64 {
    60 * 60 * 24 // 1 day
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_expiry_secs: default_session_expiry(),
            secure_cookies: false,
        }
    }
}

/// Board behaviour configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Questions per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_size() -> i64 {
    crate::board::DEFAULT_PAGE_SIZE
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Console only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Web session configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Board configuration.
    #[serde(default)]
    pub board: BoardConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(QaboardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| QaboardError::Config(format!("parse error: {e}")))
    }

    /// Apply environment variable overrides.
    ///
    /// `QABOARD_JWT_SECRET` replaces the session secret when non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var(JWT_SECRET_ENV) {
            if !jwt_secret.is_empty() {
                self.web.jwt_secret = jwt_secret;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.web.jwt_secret.is_empty() {
            return Err(QaboardError::Config(format!(
                "jwt_secret is not set. Set it in config.toml or via {JWT_SECRET_ENV}."
            )));
        }
        if self.board.page_size < 1 {
            return Err(QaboardError::Config(
                "board.page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
