//! Startup orchestration.
//!
//! # Responsibilities
//! - Install signal handlers before anything binds
//! - Load and validate configuration
//! - Start the metrics exporter when one is configured
//! - Build the engine from the config and run it under the supervisor
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Ordered: config first, then metrics, then the engine; an invalid config
//!   never constructs an engine

use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

use crate::config::{self, ConfigError};
use crate::engine::{EngineSettings, RelayEngine, UdpTurnEngine};
use crate::lifecycle::signals::{OsSignals, SignalSource};
use crate::lifecycle::supervisor::{LifecycleError, ShutdownCause, Supervisor};
use crate::observability::metrics;

/// Any failure between process start and process exit.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to start metrics exporter on {addr}: {source}")]
    Metrics { addr: SocketAddr, source: BuildError },

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Run the relay from the process environment until SIGINT or SIGTERM.
pub async fn run() -> Result<ShutdownCause, StartupError> {
    let signals = OsSignals::install().map_err(LifecycleError::Signals)?;
    launch(config::process_env, UdpTurnEngine::new, signals).await
}

/// Load config through `lookup`, build an engine with `make_engine` and
/// supervise it until `signals` delivers a termination request.
pub async fn launch<L, F, E, S>(
    lookup: L,
    make_engine: F,
    signals: S,
) -> Result<ShutdownCause, StartupError>
where
    L: Fn(&str) -> Option<String>,
    F: FnOnce(EngineSettings) -> E,
    E: RelayEngine,
    S: SignalSource,
{
    let config = config::load_from(lookup)?;

    tracing::info!(
        realm = %config.realm,
        udp_port = config.udp_port,
        channel_bind_timeout = ?config.channel_bind_timeout,
        software = %config.software,
        relay_address = %config.relay_address,
        users = ?config.credentials.usernames(),
        "Configuration loaded"
    );

    if let Some(addr) = config.metrics_address {
        metrics::init_metrics(addr).map_err(|source| StartupError::Metrics { addr, source })?;
    }

    let engine = make_engine(EngineSettings::from_config(config));
    Ok(Supervisor::new(engine, signals).run().await?)
}
