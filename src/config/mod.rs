//! Server configuration from environment variables (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/heroes";
pub const DEFAULT_BIND: &str = "0.0.0.0:5555";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Where rows live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local tables; contents are lost on exit.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::UnknownStorage(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind: SocketAddr,
    pub max_connections: u32,
    pub storage: StorageBackend,
    /// Reset all tables and load the seed data at startup.
    pub seed: bool,
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind = parse_var(&lookup, "HEROES_BIND", DEFAULT_BIND.parse::<SocketAddr>().ok())?;
        let max_connections = parse_var(&lookup, "HEROES_MAX_CONNECTIONS", Some(DEFAULT_MAX_CONNECTIONS))?;
        let storage = match lookup("HEROES_STORAGE") {
            Some(s) => s.parse()?,
            None => StorageBackend::Postgres,
        };
        let seed = match lookup("HEROES_SEED") {
            Some(s) => parse_bool("HEROES_SEED", &s)?,
            None => false,
        };
        let body_limit = parse_var(&lookup, "HEROES_BODY_LIMIT", Some(DEFAULT_BODY_LIMIT))?;
        Ok(ServerConfig {
            database_url,
            bind,
            max_connections,
            storage,
            seed,
            body_limit,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => default.ok_or(ConfigError::Invalid {
            name,
            value: String::new(),
        }),
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
        }),
    }
}
