//! Long-term credential authentication.
//!
//! # Data Flow
//! ```text
//! USERS env string
//!     → credentials.rs (scan word=word pairs)
//!     → CredentialTable (immutable)
//!     → handler.rs (StaticAuthHandler, shared via Arc)
//!     → relay engine calls lookup() per authentication attempt
//! ```
//!
//! # Design Decisions
//! - Lookups are read-only, so no locking around the table
//! - Malformed credential fragments are skipped, never fatal
//! - The engine only sees the `AuthHandler` trait, so other credential
//!   sources can replace the static table

pub mod credentials;
pub mod handler;

pub use credentials::{parse_credentials, CredentialTable, DEFAULT_USERS};
pub use handler::{AuthHandler, StaticAuthHandler};
