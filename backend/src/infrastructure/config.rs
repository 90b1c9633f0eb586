//! Server settings.
//!
//! Layered lowest to highest: built-in defaults, an optional
//! `integraupt.{toml,yaml,json}` in the working directory, then `INTEGRAUPT__*`
//! environment variables (`INTEGRAUPT__SERVER__PORT=9000`). Call
//! `dotenvy::dotenv()` first to pull a `.env` file into the environment.

use std::fmt;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub crypto: CryptoSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Postgres URL. Without one the server keeps users in memory.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Clone, Deserialize)]
pub struct CryptoSettings {
    /// Base64 AES key, 16, 24 or 32 bytes once decoded
    pub secret_key: String,
}

impl fmt::Debug for CryptoSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoSettings")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("integraupt").required(false))
                .add_source(
                    Environment::with_prefix("INTEGRAUPT")
                        .separator("__")
                        .list_separator(",")
                        .with_list_parse_key("cors.allowed_origins")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 5)?
            .set_default("cors.allowed_origins", vec!["http://localhost:5173"])?
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration (is INTEGRAUPT__CRYPTO__SECRET_KEY set?)")
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.server.host, self.server.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let settings = Settings::from_builder(
            Config::builder().set_override("crypto.secret_key", "QUVTRGVtb1NlY3JldEtleQ==").unwrap(),
        )
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.max_connections, 5);
        assert!(settings.database.url.is_none());
        assert_eq!(settings.cors.allowed_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(settings.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_missing_secret_key_fails() {
        assert!(Settings::from_builder(Config::builder()).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let crypto = CryptoSettings {
            secret_key: "QUVTRGVtb1NlY3JldEtleQ==".to_string(),
        };
        assert!(!format!("{:?}", crypto).contains("QUVT"));
    }
}
