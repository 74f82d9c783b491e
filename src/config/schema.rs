//! Configuration schema definitions.
//!
//! Every field is populated from the environment by `loader.rs`; the
//! defaults below apply when a variable is absent or empty.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::auth::CredentialTable;

/// Realm used when `REALM` is unset.
pub const DEFAULT_REALM: &str = "test.tiga.wang";

/// Standard STUN/TURN port.
pub const DEFAULT_UDP_PORT: u16 = 3478;

/// Relay address advertised when `RELAY_ADDRESS` is unset.
pub const DEFAULT_RELAY_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Root configuration for the relay process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Authentication realm sent in challenges.
    pub realm: String,

    /// UDP port the engine listens on.
    pub udp_port: u16,

    /// Channel binding lifetime. Zero leaves the engine default in place.
    pub channel_bind_timeout: Duration,

    /// Software identifier. May be empty.
    pub software: String,

    /// Long-term credentials.
    pub credentials: CredentialTable,

    /// Address advertised to clients for relayed transports.
    pub relay_address: IpAddr,

    /// Prometheus scrape endpoint. `None` disables the exporter.
    pub metrics_address: Option<SocketAddr>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            realm: DEFAULT_REALM.to_string(),
            udp_port: DEFAULT_UDP_PORT,
            channel_bind_timeout: Duration::ZERO,
            software: String::new(),
            credentials: crate::auth::parse_credentials(""),
            relay_address: DEFAULT_RELAY_ADDRESS,
            metrics_address: None,
        }
    }
}
