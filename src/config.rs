use std::{env, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_idle_time: Duration,
    pub query_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub env: String,
    pub cors_allowed_origin: String,
    pub db: DbConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset keys fall back to
    /// defaults; set-but-unparsable keys are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "APP_PORT", 3000u16)?;
        let env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|| "http://localhost:5173".to_string());

        let db = DbConfig {
            max_connections: parse_nonzero_or(&lookup, "DB_MAX_CONNECTIONS", 30u32)?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 0u32)?,
            max_idle_time: Duration::from_secs(parse_or(&lookup, "DB_MAX_IDLE_TIME_SECS", 900u64)?),
            query_timeout: Duration::from_secs(parse_nonzero_or(
                &lookup,
                "DB_QUERY_TIMEOUT_SECS",
                5u64,
            )?),
        };

        Ok(Self {
            database_url,
            host,
            port,
            env,
            cors_allowed_origin,
            db,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// Like [`parse_or`], for settings where zero would make every query or pool
/// acquire fail immediately.
fn parse_nonzero_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Default + PartialEq,
{
    let value = parse_or(lookup, key, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
        });
    }
    Ok(value)
}
