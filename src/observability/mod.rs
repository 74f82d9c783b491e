//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, auth, lifecycle, relay engine
//!     → logging.rs (structured log events, engine `log` output bridged in)
//!     → metrics.rs (auth counters, supervisor state gauge)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Logging is initialized before configuration so config errors are logged
//! - Metrics are cheap and silently dropped when no exporter is installed

pub mod logging;
pub mod metrics;
