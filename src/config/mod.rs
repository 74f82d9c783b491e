//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (USERS, REALM, UDP_PORT, ...)
//!     → loader.rs (one typed parser per variable)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → consumed once by the lifecycle supervisor
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - Unset and empty variables both mean "use the default"
//! - Any parse or validation error is fatal at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from, process_env, ConfigError};
pub use schema::ServerConfig;
pub use validation::ValidationError;
