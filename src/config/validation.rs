//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic checks that field parsers cannot make on their own
//! - Report every violation, not just the first
//!
//! # Design Decisions
//! - Pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is handed to the supervisor

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem with a parsed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("REALM must not be empty")]
    EmptyRealm,

    #[error("UDP_PORT must be between 1 and 65535")]
    ZeroPort,

    #[error("RELAY_ADDRESS must be a concrete address, got {0}")]
    UnspecifiedRelayAddress(std::net::IpAddr),
}

impl ValidationError {
    /// Environment variable the problem originates from.
    pub fn variable(&self) -> &'static str {
        match self {
            ValidationError::EmptyRealm => "REALM",
            ValidationError::ZeroPort => "UDP_PORT",
            ValidationError::UnspecifiedRelayAddress(_) => "RELAY_ADDRESS",
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.realm.is_empty() {
        errors.push(ValidationError::EmptyRealm);
    }
    if config.udp_port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.relay_address.is_unspecified() {
        errors.push(ValidationError::UnspecifiedRelayAddress(config.relay_address));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
