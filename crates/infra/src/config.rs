//! Configuration loading and representation.
//!
//! Values come from the process environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SNIPPETBOX_ADDR` | `0.0.0.0:4000` | Listen address |
//! | `DATABASE_URL` | unset | Postgres connection string; unset means in-memory storage |
//! | `SNIPPETBOX_STATIC_DIR` | `./ui/static` | Directory served under `/static/` |
//! | `SNIPPETBOX_DB_MAX_CONNECTIONS` | `10` | Pool size |

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:4000";
pub const DEFAULT_STATIC_DIR: &str = "./ui/static";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: Option<String>,
    pub static_dir: PathBuf,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr_raw = get("SNIPPETBOX_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw.trim().parse().map_err(|e| ConfigError::Invalid {
            key: "SNIPPETBOX_ADDR",
            reason: format!("{addr_raw:?}: {e}"),
        })?;

        let db_max_connections = match get("SNIPPETBOX_DB_MAX_CONNECTIONS") {
            None => DEFAULT_DB_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "SNIPPETBOX_DB_MAX_CONNECTIONS",
                        reason: format!("{raw:?} is not a positive integer"),
                    });
                }
            },
        };

        Ok(Self {
            addr,
            database_url: get("DATABASE_URL"),
            static_dir: get("SNIPPETBOX_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            db_max_connections,
        })
    }
}
