use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;
use shortie_engine::ServiceSettings;
use thiserror::Error;

use crate::logging::{LogDestination, DEFAULT_LOG_FILE};

pub const ENV_SHORTEN_URL: &str = "SHORTIE_SHORTEN_URL";
pub const ENV_STATS_URL: &str = "SHORTIE_STATS_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "SHORTIE_REQUEST_TIMEOUT_SECS";
pub const ENV_LOG: &str = "SHORTIE_LOG";
pub const ENV_LOG_LEVEL: &str = "SHORTIE_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "SHORTIE_LOG_FILE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("{name} must be one of terminal, file, both, off; got {value:?}")]
    InvalidLogDestination { name: &'static str, value: String },
    #[error("{name} is not a log level: {value:?}")]
    InvalidLogLevel { name: &'static str, value: String },
    #[error(".env file could not be loaded: {0}")]
    DotEnv(String),
}

/// Host configuration. Unset variables keep the defaults.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub services: ServiceSettings,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            services: ServiceSettings::default(),
            log_destination: LogDestination::default(),
            log_level: LevelFilter::Info,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl HostConfig {
    /// Reads `.env` (if present) and then the process environment.
    ///
    /// A missing `.env` is fine; an unreadable or malformed one is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        check_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup(ENV_SHORTEN_URL)) {
            config.services.shorten_endpoint = url;
        }
        if let Some(url) = non_empty(lookup(ENV_STATS_URL)) {
            config.services.stats_endpoint = url;
        }
        if let Some(value) = non_empty(lookup(ENV_REQUEST_TIMEOUT_SECS)) {
            config.services.request_timeout = parse_timeout(ENV_REQUEST_TIMEOUT_SECS, value)?;
        }
        if let Some(value) = non_empty(lookup(ENV_LOG)) {
            config.log_destination = parse_destination(value)?;
        }
        if let Some(path) = non_empty(lookup(ENV_LOG_FILE)) {
            config.log_file = PathBuf::from(path);
        }
        if let Some(value) = non_empty(lookup(ENV_LOG_LEVEL)) {
            config.log_level = value.parse().map_err(|_| ConfigError::InvalidLogLevel {
                name: ENV_LOG_LEVEL,
                value,
            })?;
        }

        Ok(config)
    }
}

fn check_dotenv(loaded: Result<PathBuf, dotenvy::Error>) -> Result<(), ConfigError> {
    match loaded {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::DotEnv(err.to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timeout(name: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout { name, value }),
    }
}

fn parse_destination(value: String) -> Result<LogDestination, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "terminal" => Ok(LogDestination::Terminal),
        "file" => Ok(LogDestination::File),
        "both" => Ok(LogDestination::Both),
        "off" => Ok(LogDestination::Off),
        _ => Err(ConfigError::InvalidLogDestination {
            name: ENV_LOG,
            value,
        }),
    }
}
