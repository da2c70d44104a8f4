//! Application settings loading.
//!
//! Settings come from an optional `config.toml` in the working directory,
//! with environment variables taking precedence over the file and built-in
//! defaults filling the rest. `.env` loading happens in `main` before this
//! module runs.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Fully resolved application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// SeaORM connection string
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// How long an issued session token stays valid, in minutes
    pub session_ttl_minutes: i64,
    /// Login name of the seeded administrator account
    pub admin_username: String,
    /// Initial password of the seeded administrator account
    pub admin_password: String,
}

/// The subset of settings that may appear in `config.toml`; every field is
/// optional there.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database_url: Option<String>,
    bind_addr: Option<String>,
    session_ttl_minutes: Option<i64>,
    admin_username: Option<String>,
    admin_password: Option<String>,
}

fn parse_file<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

impl AppConfig {
    /// Loads configuration from `./config.toml` (if present) and the
    /// environment.
    pub fn load() -> Result<Self> {
        let file = if Path::new("config.toml").exists() {
            info!("loading settings from config.toml");
            parse_file("config.toml")?
        } else {
            FileConfig::default()
        };
        Self::from_parts(&file)
    }

    fn from_parts(file: &FileConfig) -> Result<Self> {
        let env = |key: &str| std::env::var(key).ok();

        let session_ttl_minutes = match env("SESSION_TTL_MINUTES") {
            Some(raw) => raw.parse().map_err(|_| Error::Config {
                message: format!("SESSION_TTL_MINUTES must be an integer, got '{raw}'"),
            })?,
            None => file.session_ttl_minutes.unwrap_or(60),
        };
        if session_ttl_minutes <= 0 {
            return Err(Error::Config {
                message: "session_ttl_minutes must be positive".to_string(),
            });
        }

        Ok(Self {
            database_url: env("DATABASE_URL")
                .or_else(|| file.database_url.clone())
                .unwrap_or_else(|| "sqlite://data/agrolibro.sqlite?mode=rwc".to_string()),
            bind_addr: env("BIND_ADDR")
                .or_else(|| file.bind_addr.clone())
                .unwrap_or_else(|| "127.0.0.1:3000".to_string()),
            session_ttl_minutes,
            admin_username: env("ADMIN_USERNAME")
                .or_else(|| file.admin_username.clone())
                .unwrap_or_else(|| "admin".to_string()),
            admin_password: env("ADMIN_PASSWORD")
                .or_else(|| file.admin_password.clone())
                .unwrap_or_else(|| "admin123".to_string()),
        })
    }

    /// Session lifetime as a chrono duration.
    pub const fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let toml_str = r#"
            database_url = "sqlite::memory:"
            bind_addr = "0.0.0.0:8080"
            session_ttl_minutes = 120
            admin_username = "root"
            admin_password = "cambiame"
        "#;

        let file: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(file.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(file.bind_addr.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(file.session_ttl_minutes, Some(120));
        assert_eq!(file.admin_username.as_deref(), Some("root"));
        assert_eq!(file.admin_password.as_deref(), Some("cambiame"));
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let file: FileConfig = toml::from_str("bind_addr = \"0.0.0.0:9000\"").unwrap();
        let config = AppConfig::from_parts(&file).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.session_ttl_minutes, 60);
        assert_eq!(config.admin_username, "admin");
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        let file: FileConfig = toml::from_str("session_ttl_minutes = 0").unwrap();
        let err = AppConfig::from_parts(&file).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
