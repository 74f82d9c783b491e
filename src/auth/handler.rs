//! Authentication capability handed to the relay engine.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::auth::credentials::CredentialTable;
use crate::observability::metrics;

/// Resolves long-term credentials for the relay engine.
///
/// Called once per authentication attempt, concurrently from the engine's
/// network tasks. Implementations must not block.
pub trait AuthHandler: Send + Sync {
    /// Return the password for `username`, or `None` if the user is unknown.
    fn lookup(&self, username: &str, source: SocketAddr) -> Option<String>;
}

/// [`AuthHandler`] backed by a fixed [`CredentialTable`].
#[derive(Debug, Clone)]
pub struct StaticAuthHandler {
    table: Arc<CredentialTable>,
}

impl StaticAuthHandler {
    pub fn new(table: CredentialTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &CredentialTable {
        &self.table
    }
}

impl AuthHandler for StaticAuthHandler {
    fn lookup(&self, username: &str, source: SocketAddr) -> Option<String> {
        let password = self.table.get(username).map(str::to_owned);
        metrics::record_auth_attempt(password.is_some());

        if password.is_none() {
            tracing::debug!(username = %username, source = %source, "Unknown TURN user");
        }
        password
    }
}
