//! Environment-based configuration
//!
//! Values come from environment variables, optionally loaded from a `.env`
//! file by `main`, with defaults for everything but the database URL.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_PROMOTION_TTL;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: String,
    /// Salon number receiving bookings, digits with country code
    pub whatsapp_number: String,
    pub business_name: String,
    pub promotion_cache_ttl: Duration,
    /// Directory holding the static site pages
    pub static_dir: PathBuf,
}

impl Config {
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:3000";
    pub const DEFAULT_WHATSAPP_NUMBER: &'static str = "554499180116";
    pub const DEFAULT_BUSINESS_NAME: &'static str = "GIROSA BEAUTY";

    /// Defaults for everything but the database URL
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            database_max_connections: 5,
            bind_addr: Self::DEFAULT_BIND_ADDR.to_string(),
            whatsapp_number: Self::DEFAULT_WHATSAPP_NUMBER.to_string(),
            business_name: Self::DEFAULT_BUSINESS_NAME.to_string(),
            promotion_cache_ttl: DEFAULT_PROMOTION_TTL,
            static_dir: PathBuf::from("static"),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let defaults = Self::with_database_url(database_url);

        Ok(Self {
            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            whatsapp_number: env::var("WHATSAPP_NUMBER").unwrap_or(defaults.whatsapp_number),
            business_name: env::var("BUSINESS_NAME").unwrap_or(defaults.business_name),
            promotion_cache_ttl: Duration::from_secs(parse_var(
                "PROMOTION_CACHE_TTL_SECS",
                defaults.promotion_cache_ttl.as_secs(),
            )?),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            database_url: defaults.database_url,
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::with_database_url("postgres://localhost/girosa");
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.whatsapp_number, "554499180116");
        assert_eq!(config.promotion_cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_parse_var_falls_back_and_rejects_garbage() {
        assert_eq!(parse_var("GIROSA_TEST_UNSET_VAR", 7u32).unwrap(), 7);

        env::set_var("GIROSA_TEST_BAD_NUMBER", "five");
        assert!(matches!(
            parse_var::<u32>("GIROSA_TEST_BAD_NUMBER", 5),
            Err(ConfigError::Invalid { key: "GIROSA_TEST_BAD_NUMBER", .. })
        ));
    }
}
