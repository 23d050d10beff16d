//! Telemetry sink interface.
//!
//! Sinks are fire-and-forget: callers log and drop any error a sink returns.

use serde::Serialize;

use crate::outcome::QueryFailure;

/// Store counts emitted once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunTelemetry {
    pub stores_found: usize,
    pub stores_queried: usize,
    pub stores_failed: usize,
}

/// Receives diagnostics from the orchestrator.
pub trait TelemetrySink: Send + Sync {
    /// Called once for every pair that failed.
    fn record_failure(&self, failure: &QueryFailure) -> Result<(), anyhow::Error>;

    /// Called once per run, after all pairs completed.
    fn record_run(&self, run: &RunTelemetry) -> Result<(), anyhow::Error>;
}
