//! UDP TURN engine backed by the `turn` crate.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use turn::auth::generate_auth_key;
use turn::relay::relay_static::RelayAddressGeneratorStatic;
use turn::server::config::{ConnConfig, ServerConfig as TurnServerConfig};
use turn::server::Server;
use webrtc_util::vnet::net::Net;

use crate::auth::AuthHandler;
use crate::engine::{EngineError, EngineSettings, RelayEngine};

/// Local address relay sockets are allocated on.
const RELAY_BIND_ADDRESS: &str = "0.0.0.0";

/// Bridges [`AuthHandler`] to the engine's key-based authentication.
///
/// The engine expects the long-term credential key
/// `MD5(username ":" realm ":" password)` rather than the password itself.
pub(crate) struct LongTermAuth {
    handler: Arc<dyn AuthHandler>,
}

impl LongTermAuth {
    pub(crate) fn new(handler: Arc<dyn AuthHandler>) -> Self {
        Self { handler }
    }
}

impl turn::auth::AuthHandler for LongTermAuth {
    fn auth_handle(
        &self,
        username: &str,
        realm: &str,
        src_addr: SocketAddr,
    ) -> Result<Vec<u8>, turn::Error> {
        match self.handler.lookup(username, src_addr) {
            Some(password) => Ok(generate_auth_key(username, realm, &password)),
            None => Err(turn::Error::Other(format!("no such user: {username}"))),
        }
    }
}

/// TURN server listening on a single UDP port.
pub struct UdpTurnEngine {
    settings: EngineSettings,
    server: Option<Server>,
}

impl UdpTurnEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            server: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.server.is_some()
    }
}

#[async_trait]
impl RelayEngine for UdpTurnEngine {
    async fn start(&mut self) -> Result<(), EngineError> {
        if self.is_running() {
            return Err(EngineError::AlreadyStarted);
        }

        let addr = self.settings.listen_addr();
        let conn = UdpSocket::bind(addr)
            .await
            .map_err(|source| EngineError::Bind { addr, source })?;

        let config = TurnServerConfig {
            conn_configs: vec![ConnConfig {
                conn: Arc::new(conn),
                relay_addr_generator: Box::new(RelayAddressGeneratorStatic {
                    relay_address: self.settings.relay_address,
                    address: RELAY_BIND_ADDRESS.to_owned(),
                    net: Arc::new(Net::new(None)),
                }),
            }],
            realm: self.settings.realm.clone(),
            auth_handler: Arc::new(LongTermAuth::new(Arc::clone(&self.settings.auth_handler))),
            channel_bind_timeout: self.settings.channel_bind_timeout,
            alloc_close_notify: None,
        };

        let server = Server::new(config)
            .await
            .map_err(|e| EngineError::Backend(e.to_string()))?;
        self.server = Some(server);

        tracing::info!(
            address = %addr,
            realm = %self.settings.realm,
            relay_address = %self.settings.relay_address,
            software = %self.settings.software,
            "TURN engine listening"
        );
        Ok(())
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        let server = self.server.take().ok_or(EngineError::NotStarted)?;
        server
            .close()
            .await
            .map_err(|e| EngineError::Backend(e.to_string()))?;

        tracing::info!(port = self.settings.listening_port, "TURN engine closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{parse_credentials, StaticAuthHandler};
    use turn::auth::AuthHandler as _;

    fn auth() -> LongTermAuth {
        LongTermAuth::new(Arc::new(StaticAuthHandler::new(parse_credentials(
            "alice=secret",
        ))))
    }

    #[test]
    fn known_user_yields_long_term_key() {
        let src = "192.0.2.10:40000".parse().unwrap();
        let key = auth().auth_handle("alice", "example.org", src).unwrap();
        assert_eq!(key, generate_auth_key("alice", "example.org", "secret"));
        assert_eq!(key.len(), 16);
    }

    #[test]
    fn key_depends_on_realm() {
        let src = "192.0.2.10:40000".parse().unwrap();
        let a = auth().auth_handle("alice", "one.example", src).unwrap();
        let b = auth().auth_handle("alice", "two.example", src).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_user_is_rejected() {
        let src = "192.0.2.10:40000".parse().unwrap();
        assert!(auth().auth_handle("mallory", "example.org", src).is_err());
    }
}
