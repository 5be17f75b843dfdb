//! Configuration loading and representation.
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file). Parsing goes through [`Config::from_lookup`] so it can be exercised
//! without mutating the real environment.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use walletd_observability::{LogFormat, LoggingConfig};

pub const DEFAULT_HTTP_PORT: u16 = 3010;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub http_port: u16,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub shutdown_timeout: Duration,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside local development.
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = get("POSTGRES_DATABASE_URL").ok_or(ConfigError::Missing("POSTGRES_DATABASE_URL"))?;

        let http_port = parse_or("HTTP_PORT", get("HTTP_PORT"), DEFAULT_HTTP_PORT)?;
        let max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            get("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }
        let acquire_timeout_secs = parse_or(
            "DATABASE_ACQUIRE_TIMEOUT_SECS",
            get("DATABASE_ACQUIRE_TIMEOUT_SECS"),
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?;
        let shutdown_timeout_secs = parse_or(
            "SHUTDOWN_TIMEOUT_SECS",
            get("SHUTDOWN_TIMEOUT_SECS"),
            DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        )?;

        let level = get("LOG_LEVEL")
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let format = match get("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().map_err(|_| ConfigError::Invalid {
                key: "LOG_FORMAT",
                value: raw,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            http_port,
            database: DatabaseConfig {
                url,
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
            logging: LoggingConfig { level, format },
            shutdown_timeout: Duration::from_secs(shutdown_timeout_secs),
        })
    }

    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.http_port))
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
