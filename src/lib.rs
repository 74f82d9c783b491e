//! TURN relay bootstrap library

pub mod auth;
pub mod config;
pub mod engine;
pub mod lifecycle;
pub mod observability;

pub use auth::{AuthHandler, CredentialTable, StaticAuthHandler};
pub use config::ServerConfig;
pub use engine::{RelayEngine, UdpTurnEngine};
pub use lifecycle::Supervisor;
