//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Install signals → Build auth handler → Build engine → Supervisor
//!
//! Supervision (supervisor.rs):
//!     Start engine → Wait for signal → Close engine → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown (first one only)
//! ```
//!
//! # Design Decisions
//! - Start always completes before the signal wait begins
//! - Close runs at most once and only after a signal
//! - Start and close failures are fatal and never retried

pub mod signals;
pub mod startup;
pub mod supervisor;

pub use signals::{OsSignals, Signal, SignalSource};
pub use supervisor::{LifecycleError, ShutdownCause, Supervisor, SupervisorState};
