//! Relay engine boundary.
//!
//! # Responsibilities
//! - Define what the supervisor needs from a relay engine: start and close
//! - Carry the settings an engine is constructed from
//! - Adapt the `turn` crate's server to that contract (udp.rs)
//!
//! # Design Decisions
//! - The TURN state machine itself lives in the engine, not here
//! - Engines receive authentication as an `Arc<dyn AuthHandler>`
//! - Start and close are async and report failures, never retry

pub mod udp;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::{AuthHandler, StaticAuthHandler};
use crate::config::ServerConfig;
use crate::observability::metrics;

pub use udp::UdpTurnEngine;

/// Errors reported by a relay engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The listening socket could not be bound.
    #[error("failed to bind UDP {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// The engine itself reported a failure.
    #[error("relay engine error: {0}")]
    Backend(String),

    #[error("relay engine is already started")]
    AlreadyStarted,

    #[error("relay engine was never started")]
    NotStarted,
}

/// A relay engine the supervisor can start and stop.
#[async_trait]
pub trait RelayEngine: Send {
    /// Bind and begin serving. Returns once the engine is accepting traffic.
    async fn start(&mut self) -> Result<(), EngineError>;

    /// Stop serving and release every engine-held resource.
    async fn close(&mut self) -> Result<(), EngineError>;
}

/// Everything an engine is constructed from.
#[derive(Clone)]
pub struct EngineSettings {
    pub realm: String,
    pub auth_handler: Arc<dyn AuthHandler>,
    /// Zero selects the engine's built-in default.
    pub channel_bind_timeout: Duration,
    pub listening_port: u16,
    pub software: String,
    pub relay_address: IpAddr,
}

impl EngineSettings {
    /// Build settings from a loaded config, backing authentication with its
    /// credential table.
    pub fn from_config(config: ServerConfig) -> Self {
        let handler = StaticAuthHandler::new(config.credentials);
        metrics::record_credentials_loaded(handler.table().len());

        Self {
            realm: config.realm,
            auth_handler: Arc::new(handler),
            channel_bind_timeout: config.channel_bind_timeout,
            listening_port: config.udp_port,
            software: config.software,
            relay_address: config.relay_address,
        }
    }

    /// Address the engine's UDP socket binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), self.listening_port)
    }
}

impl std::fmt::Debug for EngineSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSettings")
            .field("realm", &self.realm)
            .field("channel_bind_timeout", &self.channel_bind_timeout)
            .field("listening_port", &self.listening_port)
            .field("software", &self.software)
            .field("relay_address", &self.relay_address)
            .finish_non_exhaustive()
    }
}
