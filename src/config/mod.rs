//! Configuration module - environment variable parsing

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, one event per line
    Pretty,
    /// Structured JSON, one object per line
    Json,
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Server binding address
    pub server_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,

    /// Allowed client origins for CORS (empty means any origin)
    pub client_origins: Vec<String>,

    /// Maximum POST requests per second, 0 disables the limiter
    pub write_rate_limit: u32,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            client_origins: Vec::new(),
            write_rate_limit: 50,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to [`Config::default`]; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // PORT wins over SERVER_ADDR so hosted platforms can inject it
        let server_addr = match (lookup("PORT"), lookup("SERVER_ADDR")) {
            (Some(port), _) => format!("0.0.0.0:{}", port.trim())
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidAddress)?,
            (None, Some(addr)) => addr
                .trim()
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidAddress)?,
            (None, None) => defaults.server_addr,
        };

        let log_format = match lookup("LOG_FORMAT") {
            None => defaults.log_format,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "pretty" | "text" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::Invalid("LOG_FORMAT", raw)),
            },
        };

        let client_origins = lookup("CLIENT_ORIGIN")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.client_origins);

        let write_rate_limit = match lookup("WRITE_RATE_LIMIT") {
            None => defaults.write_rate_limit,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::Invalid("WRITE_RATE_LIMIT", raw))?,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            None => defaults.request_timeout,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS", raw)),
            },
        };

        Ok(Self {
            server_addr,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format,
            client_origins,
            write_rate_limit,
            request_timeout,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),

    #[error("Invalid server address format")]
    InvalidAddress,
}
