//! # Cashbox Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.
//!
//! | Variable                  | Default        | Meaning                       |
//! |---------------------------|----------------|-------------------------------|
//! | `CASHBOX_DB_PATH`         | `./cashbox.db` | SQLite database file          |
//! | `CASHBOX_MAX_CONNECTIONS` | `5`            | Pool size                     |
//! | `CASHBOX_QUANTITY_POLICY` | `reject`       | `reject` or `allow_deficit`   |

use cashbox_core::QuantityPolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::pool::DbConfig;

pub const ENV_DB_PATH: &str = "CASHBOX_DB_PATH";
pub const ENV_MAX_CONNECTIONS: &str = "CASHBOX_MAX_CONNECTIONS";
pub const ENV_QUANTITY_POLICY: &str = "CASHBOX_QUANTITY_POLICY";

const DEFAULT_DB_PATH: &str = "./cashbox.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Cashbox configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashboxConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Maximum pooled connections
    pub max_connections: u32,

    /// What happens when a mutation would make a quantity negative
    pub quantity_policy: QuantityPolicy,
}

impl Default for CashboxConfig {
    fn default() -> Self {
        CashboxConfig {
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            quantity_policy: QuantityPolicy::default(),
        }
    }
}

impl CashboxConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a map instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CashboxConfig::default();

        let database_path = lookup(ENV_DB_PATH)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        let max_connections = match lookup(ENV_MAX_CONNECTIONS) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string()))?,
            None => defaults.max_connections,
        };

        let quantity_policy = match lookup(ENV_QUANTITY_POLICY) {
            Some(raw) => raw
                .parse::<QuantityPolicy>()
                .map_err(|_| ConfigError::InvalidValue(ENV_QUANTITY_POLICY.to_string()))?,
            None => defaults.quantity_policy,
        };

        Ok(CashboxConfig {
            database_path,
            max_connections,
            quantity_policy,
        })
    }

    /// Builds the pool configuration for this setup.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
            .max_connections(self.max_connections)
            .quantity_policy(self.quantity_policy)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
