//! TURN Relay (v1)
//!
//! Configures, starts and stops a long-term-credential TURN relay.
//!
//! # Architecture Overview
//!
//! ```text
//!   environment ──▶ config ──▶ ServerConfig ──┐
//!                                             │
//!                                             ▼
//!                 ┌──────────────────── lifecycle ─────────────────────┐
//!                 │  auth handler ──▶ engine (turn) ──▶ supervisor     │
//!                 │                                        ▲           │
//!                 │                     SIGINT / SIGTERM ──┘           │
//!                 └────────────────────────────────────────────────────┘
//!
//!   observability: tracing logs (engine `log` output bridged in),
//!                  optional Prometheus endpoint
//! ```
//!
//! # Environment
//! - `USERS`: `name=password` pairs
//! - `REALM`, `UDP_PORT`, `CHANNEL_BIND_TIMEOUT`, `SOFTWARE`
//! - `RELAY_ADDRESS`, `METRICS_ADDRESS`
//! - `RUST_LOG`, `LOG_FORMAT`

use std::process::ExitCode;

use turn_relay::lifecycle::startup::{self, StartupError};
use turn_relay::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "turn-relay starting");

    match startup::run().await {
        Ok(cause) => {
            tracing::info!(cause = ?cause, "Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(StartupError::Config(e)) => {
            tracing::error!(variable = e.variable(), error = %e, "Invalid configuration");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "Relay terminated with error");
            ExitCode::FAILURE
        }
    }
}
