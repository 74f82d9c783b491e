//! Configuration loading from the process environment.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

use crate::auth::parse_credentials;
use crate::config::schema::{ServerConfig, DEFAULT_REALM, DEFAULT_RELAY_ADDRESS, DEFAULT_UDP_PORT};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable names.
pub mod vars {
    pub const USERS: &str = "USERS";
    pub const REALM: &str = "REALM";
    pub const UDP_PORT: &str = "UDP_PORT";
    pub const CHANNEL_BIND_TIMEOUT: &str = "CHANNEL_BIND_TIMEOUT";
    pub const SOFTWARE: &str = "SOFTWARE";
    pub const RELAY_ADDRESS: &str = "RELAY_ADDRESS";
    pub const METRICS_ADDRESS: &str = "METRICS_ADDRESS";
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("UDP_PORT={value:?} is not a valid port: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },

    #[error("CHANNEL_BIND_TIMEOUT={value:?} is an invalid duration: {source}")]
    InvalidDuration {
        value: String,
        source: humantime::DurationError,
    },

    #[error("{variable}={value:?} is not a valid address: {source}")]
    InvalidAddress {
        variable: &'static str,
        value: String,
        source: AddrParseError,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

impl ConfigError {
    /// Name of the variable that failed. For validation failures this is
    /// the first offending variable.
    pub fn variable(&self) -> &'static str {
        match self {
            ConfigError::InvalidPort { .. } => vars::UDP_PORT,
            ConfigError::InvalidDuration { .. } => vars::CHANNEL_BIND_TIMEOUT,
            ConfigError::InvalidAddress { variable, .. } => *variable,
            ConfigError::Validation(errors) => errors
                .first()
                .map(ValidationError::variable)
                .unwrap_or("unknown"),
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Variable lookup over the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Load and validate configuration from an arbitrary variable lookup.
///
/// Empty values are treated the same as absent ones.
pub fn load_from<F>(lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

    let users = get(vars::USERS);
    if users.is_none() {
        tracing::warn!("USERS is not set, falling back to the built-in demo credential");
    }
    let credentials = parse_credentials(users.as_deref().unwrap_or(""));
    if credentials.is_empty() {
        tracing::warn!("USERS contained no valid name=password pairs, every authentication will fail");
    }

    let config = ServerConfig {
        realm: parse_realm(get(vars::REALM)),
        udp_port: parse_udp_port(get(vars::UDP_PORT).as_deref())?,
        channel_bind_timeout: parse_channel_bind_timeout(get(vars::CHANNEL_BIND_TIMEOUT).as_deref())?,
        software: get(vars::SOFTWARE).unwrap_or_default(),
        credentials,
        relay_address: parse_relay_address(get(vars::RELAY_ADDRESS).as_deref())?,
        metrics_address: parse_metrics_address(get(vars::METRICS_ADDRESS).as_deref())?,
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// `REALM`: falls back to [`DEFAULT_REALM`].
pub fn parse_realm(raw: Option<String>) -> String {
    raw.unwrap_or_else(|| {
        tracing::warn!(realm = DEFAULT_REALM, "REALM is not set, using the built-in realm");
        DEFAULT_REALM.to_string()
    })
}

/// `UDP_PORT`: decimal port number, [`DEFAULT_UDP_PORT`] when absent.
pub fn parse_udp_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_UDP_PORT),
        Some(value) => value.parse().map_err(|source| ConfigError::InvalidPort {
            value: value.to_string(),
            source,
        }),
    }
}

/// `CHANNEL_BIND_TIMEOUT`: human-readable duration such as `10m` or
/// `1h30m`. Zero when absent.
pub fn parse_channel_bind_timeout(raw: Option<&str>) -> Result<Duration, ConfigError> {
    match raw {
        None | Some("0") => Ok(Duration::ZERO),
        Some(value) => {
            humantime::parse_duration(value).map_err(|source| ConfigError::InvalidDuration {
                value: value.to_string(),
                source,
            })
        }
    }
}

/// `RELAY_ADDRESS`: IP advertised for relayed transports.
pub fn parse_relay_address(raw: Option<&str>) -> Result<IpAddr, ConfigError> {
    match raw {
        None => Ok(DEFAULT_RELAY_ADDRESS),
        Some(value) => value.parse().map_err(|source| ConfigError::InvalidAddress {
            variable: vars::RELAY_ADDRESS,
            value: value.to_string(),
            source,
        }),
    }
}

/// `METRICS_ADDRESS`: optional `ip:port` for the Prometheus endpoint.
pub fn parse_metrics_address(raw: Option<&str>) -> Result<Option<SocketAddr>, ConfigError> {
    raw.map(|value| {
        value.parse().map_err(|source| ConfigError::InvalidAddress {
            variable: vars::METRICS_ADDRESS,
            value: value.to_string(),
            source,
        })
    })
    .transpose()
}
