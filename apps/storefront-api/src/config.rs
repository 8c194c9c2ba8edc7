//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                 | Default                      |
//! |--------------------------|------------------------------|
//! | `PORT`                   | `5050`                       |
//! | `STOREFRONT_DB_PATH`     | `./storefront.db`            |
//! | `DB_MAX_CONNECTIONS`     | `5`                          |
//! | `REQUEST_TIMEOUT_SECS`   | `30`                         |
//! | `LOCKOUT_PRODUCT_ID`     | `67cfc3218e6716214620f936`   |
//! | `LOCKOUT_WINDOW_MINUTES` | `60`                         |
//!
//! An empty `LOCKOUT_PRODUCT_ID` disables the lockout rule.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use storefront_core::{DocumentId, LockoutRule};

/// Product the lockout rule applies to unless configured otherwise.
pub const DEFAULT_LOCKOUT_PRODUCT_ID: &str = "67cfc3218e6716214620f936";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Recent-order lockout, if enabled
    pub lockout: Option<LockoutRule>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let lockout_product = get("LOCKOUT_PRODUCT_ID", DEFAULT_LOCKOUT_PRODUCT_ID);
        let lockout_minutes: i64 = parse(&get("LOCKOUT_WINDOW_MINUTES", "60"), "LOCKOUT_WINDOW_MINUTES")?;
        let lockout_window = chrono::Duration::try_minutes(lockout_minutes)
            .filter(|window| *window >= chrono::Duration::zero())
            .ok_or_else(|| ConfigError::InvalidValue("LOCKOUT_WINDOW_MINUTES".to_string()))?;

        let lockout = match lockout_product.trim() {
            "" => None,
            raw => {
                let product_id = DocumentId::parse(raw)
                    .map_err(|_| ConfigError::InvalidValue("LOCKOUT_PRODUCT_ID".to_string()))?;
                Some(LockoutRule::new(product_id, lockout_window))
            }
        };

        Ok(ServerConfig {
            port: parse(&get("PORT", "5050"), "PORT")?,
            database_path: PathBuf::from(get("STOREFRONT_DB_PATH", "./storefront.db")),
            db_max_connections: parse(&get("DB_MAX_CONNECTIONS", "5"), "DB_MAX_CONNECTIONS")?,
            request_timeout: Duration::from_secs(parse(
                &get("REQUEST_TIMEOUT_SECS", "30"),
                "REQUEST_TIMEOUT_SECS",
            )?),
            lockout,
        })
    }
}

fn parse<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 5050);
        assert_eq!(config.database_path, PathBuf::from("./storefront.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(30));

        let lockout = config.lockout.unwrap();
        assert_eq!(lockout.product_id.as_str(), DEFAULT_LOCKOUT_PRODUCT_ID);
        assert_eq!(lockout.window, chrono::Duration::minutes(60));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("LOCKOUT_PRODUCT_ID", "67cfc3218e6716214620f930"),
            ("LOCKOUT_WINDOW_MINUTES", "15"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        let lockout = config.lockout.unwrap();
        assert_eq!(lockout.product_id.as_str(), "67cfc3218e6716214620f930");
        assert_eq!(lockout.window, chrono::Duration::minutes(15));
    }

    #[test]
    fn test_empty_lockout_id_disables_rule() {
        let config = config_from(&[("LOCKOUT_PRODUCT_ID", "")]).unwrap();
        assert!(config.lockout.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("PORT", "http")]),
            Err(ConfigError::InvalidValue(key)) if key == "PORT"
        ));
        assert!(matches!(
            config_from(&[("LOCKOUT_PRODUCT_ID", "red-set")]),
            Err(ConfigError::InvalidValue(key)) if key == "LOCKOUT_PRODUCT_ID"
        ));
        assert!(matches!(
            config_from(&[("LOCKOUT_WINDOW_MINUTES", "-5")]),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
