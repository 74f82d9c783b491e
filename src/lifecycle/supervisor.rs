//! Relay engine supervision.
//!
//! # State Transitions
//! ```text
//! Idle → Running: engine start succeeded
//! Idle → Terminated: engine start failed (close is never attempted)
//! Running → ShuttingDown: first termination signal received
//! ShuttingDown → Terminated: engine close returned, whatever the outcome
//! ```
//!
//! `run` consumes the supervisor, so close happens at most once.

use thiserror::Error;
use tokio::sync::watch;

use crate::engine::{EngineError, RelayEngine};
use crate::lifecycle::signals::{Signal, SignalSource};
use crate::observability::metrics;

/// Supervisor lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// Engine constructed, not started.
    Idle,
    /// Engine started; waiting for a termination signal.
    Running,
    /// Signal received; engine close in progress.
    ShuttingDown,
    /// Engine closed or never started.
    Terminated,
}

/// Fatal lifecycle failures.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to install signal handlers: {0}")]
    Signals(#[source] std::io::Error),

    #[error("relay engine failed to start: {0}")]
    EngineStart(#[source] EngineError),

    #[error("relay engine failed to close: {0}")]
    EngineClose(#[source] EngineError),
}

/// Why the supervisor left the Running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownCause {
    Signal(Signal),
    /// The signal source closed without delivering a signal.
    SourceClosed,
}

/// Owns a relay engine from start to close.
pub struct Supervisor<E, S> {
    engine: E,
    signals: S,
    state: watch::Sender<SupervisorState>,
}

impl<E, S> Supervisor<E, S>
where
    E: RelayEngine,
    S: SignalSource,
{
    /// Create a supervisor in the Idle state.
    pub fn new(engine: E, signals: S) -> Self {
        let (state, _) = watch::channel(SupervisorState::Idle);
        metrics::record_supervisor_state(SupervisorState::Idle);
        Self {
            engine,
            signals,
            state,
        }
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SupervisorState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SupervisorState {
        *self.state.borrow()
    }

    fn transition(&self, next: SupervisorState) {
        let previous = self.state.send_replace(next);
        metrics::record_supervisor_state(next);
        tracing::debug!(from = ?previous, to = ?next, "Supervisor state changed");
    }

    /// Start the engine, wait for one termination signal, then close it.
    pub async fn run(mut self) -> Result<ShutdownCause, LifecycleError> {
        if let Err(e) = self.engine.start().await {
            self.transition(SupervisorState::Terminated);
            return Err(LifecycleError::EngineStart(e));
        }
        self.transition(SupervisorState::Running);
        tracing::info!("Relay engine started, waiting for SIGINT or SIGTERM");

        let cause = match self.signals.recv().await {
            Some(signal) => {
                tracing::info!(signal = %signal, "Shutdown signal received");
                ShutdownCause::Signal(signal)
            }
            None => {
                tracing::warn!("Signal source closed, shutting down");
                ShutdownCause::SourceClosed
            }
        };

        self.transition(SupervisorState::ShuttingDown);
        let closed = self.engine.close().await;
        self.transition(SupervisorState::Terminated);

        closed.map_err(LifecycleError::EngineClose)?;
        tracing::info!("Relay engine closed");
        Ok(cause)
    }
}
