use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const CONFIG_PATH_VAR: &str = "ADMINLIST_CONFIG";

const DEFAULT_DATABASE_URL: &str = "sqlite://adminslist.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 1;
const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout_secs: u64,
    /// `0` disables the background reload task.
    pub cache_reload_interval_secs: u64,
    pub admins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
            cache_reload_interval_secs: 0,
            admins: Vec::new(),
        }
    }
}

impl Config {
    /// In-memory database, used by tests and dry runs.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            ..Self::default()
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `ADMINLIST_*` variables through `lookup`. Unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup("ADMINLIST_DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_or("ADMINLIST_MAX_CONNECTIONS", &lookup, defaults.max_connections),
            busy_timeout_secs: parse_or("ADMINLIST_BUSY_TIMEOUT_SECS", &lookup, defaults.busy_timeout_secs),
            cache_reload_interval_secs: parse_or(
                "ADMINLIST_CACHE_RELOAD_SECS",
                &lookup,
                defaults.cache_reload_interval_secs,
            ),
            admins: lookup("ADMINLIST_ADMINS")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|auth| !auth.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }

    pub fn reload_interval(&self) -> Option<Duration> {
        (self.cache_reload_interval_secs > 0).then(|| Duration::from_secs(self.cache_reload_interval_secs))
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}
