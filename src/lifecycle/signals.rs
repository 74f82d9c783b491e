//! OS signal handling.
//!
//! # Responsibilities
//! - Register SIGINT and SIGTERM handlers
//! - Translate delivered signals into [`Signal`] values for the supervisor
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Handlers are installed before the engine starts, so a signal arriving
//!   during startup is held until the supervisor is ready for it
//! - Once installed, further signals no longer kill the process; they queue
//!   and are ignored after the first

use std::fmt;
use std::io;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// A termination request delivered to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Interrupt => write!(f, "SIGINT"),
            Signal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Source of termination signals.
#[async_trait]
pub trait SignalSource: Send {
    /// Wait for the next signal. `None` means the source can never deliver
    /// another one.
    async fn recv(&mut self) -> Option<Signal>;
}

/// Injected signals, used by tests and embedders.
#[async_trait]
impl SignalSource for mpsc::Receiver<Signal> {
    async fn recv(&mut self) -> Option<Signal> {
        mpsc::Receiver::recv(self).await
    }
}

/// SIGINT and SIGTERM from the operating system.
#[cfg(unix)]
pub struct OsSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl OsSignals {
    /// Register the handlers. Must be called from within a Tokio runtime.
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }
}

#[cfg(unix)]
#[async_trait]
impl SignalSource for OsSignals {
    async fn recv(&mut self) -> Option<Signal> {
        tokio::select! {
            received = self.interrupt.recv() => received.map(|()| Signal::Interrupt),
            received = self.terminate.recv() => received.map(|()| Signal::Terminate),
        }
    }
}

/// Ctrl-C on platforms without unix signals.
#[cfg(not(unix))]
pub struct OsSignals {
    _private: (),
}

#[cfg(not(unix))]
impl OsSignals {
    pub fn install() -> io::Result<Self> {
        Ok(Self { _private: () })
    }
}

#[cfg(not(unix))]
#[async_trait]
impl SignalSource for OsSignals {
    async fn recv(&mut self) -> Option<Signal> {
        tokio::signal::ctrl_c().await.ok().map(|()| Signal::Interrupt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_names() {
        assert_eq!(Signal::Interrupt.to_string(), "SIGINT");
        assert_eq!(Signal::Terminate.to_string(), "SIGTERM");
    }

    #[tokio::test]
    async fn channel_source_delivers_in_order() {
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(Signal::Terminate).await.unwrap();
        tx.send(Signal::Interrupt).await.unwrap();
        drop(tx);

        assert_eq!(SignalSource::recv(&mut rx).await, Some(Signal::Terminate));
        assert_eq!(SignalSource::recv(&mut rx).await, Some(Signal::Interrupt));
        assert_eq!(SignalSource::recv(&mut rx).await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn installs_os_handlers() {
        assert!(OsSignals::install().is_ok());
    }
}
