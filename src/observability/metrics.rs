//! Metrics collection and exposition.
//!
//! # Metrics
//! - `turn_auth_attempts_total` (counter): lookups by result (`found`, `unknown`)
//! - `turn_credentials_loaded` (gauge): size of the credential table
//! - `turn_supervisor_state` (gauge): 0=idle, 1=running, 2=shutting down, 3=terminated
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter. An
//! exporter that was asked for but cannot bind is a startup error.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::lifecycle::SupervisorState;

/// Install the Prometheus exporter with an HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_auth_attempt(found: bool) {
    let result = if found { "found" } else { "unknown" };
    counter!("turn_auth_attempts_total", "result" => result).increment(1);
}

pub fn record_credentials_loaded(count: usize) {
    gauge!("turn_credentials_loaded").set(count as f64);
}

pub fn record_supervisor_state(state: SupervisorState) {
    let value = match state {
        SupervisorState::Idle => 0.0,
        SupervisorState::Running => 1.0,
        SupervisorState::ShuttingDown => 2.0,
        SupervisorState::Terminated => 3.0,
    };
    gauge!("turn_supervisor_state").set(value);
}
