//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Error from reading server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Configuration for the HTTP host.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on (`PLANNER_ADDR`).
    pub addr: SocketAddr,

    /// Data file to load at startup (`PLANNER_DATA`).
    pub data_path: PathBuf,

    /// Longest a single optimization may run (`PLANNER_DEADLINE_MS`).
    pub deadline: Duration,

    /// Largest capacity accepted per request (`PLANNER_MAX_CAPACITY`).
    /// The selection table grows linearly with capacity.
    pub max_capacity: i64,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            addr: parse_var(&lookup, "PLANNER_ADDR")?.unwrap_or(defaults.addr),
            data_path: lookup("PLANNER_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            deadline: parse_var(&lookup, "PLANNER_DEADLINE_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.deadline),
            max_capacity: parse_var(&lookup, "PLANNER_MAX_CAPACITY")?
                .unwrap_or(defaults.max_capacity),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_path: PathBuf::from("data.txt"),
            deadline: Duration::from_secs(5),
            max_capacity: 1_000_000,
        }
    }
}
