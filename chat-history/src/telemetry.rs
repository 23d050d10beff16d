//! Telemetry sinks.
//!
//! - [`TracingTelemetry`]: writes run counts and failures as structured tracing events
//! - [`NoopTelemetry`]: discards everything

use chat_core::{QueryFailure, RunTelemetry, TelemetrySink};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// Emits telemetry as `tracing` events under the `chat_history::telemetry` target.
#[derive(Debug, Clone, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn record_failure(&self, failure: &QueryFailure) -> Result<(), anyhow::Error> {
        warn!(
            target: "chat_history::telemetry",
            store_path = %failure.store_id,
            kind = ?failure.kind,
            reason = %failure.reason,
            "Store query failed"
        );
        Ok(())
    }

    fn record_run(&self, run: &RunTelemetry) -> Result<(), anyhow::Error> {
        info!(
            target: "chat_history::telemetry",
            stores_found = run.stores_found,
            stores_queried = run.stores_queried,
            stores_failed = run.stores_failed,
            "Chat history run finished"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record_failure(&self, _failure: &QueryFailure) -> Result<(), anyhow::Error> {
        Ok(())
    }

    fn record_run(&self, _run: &RunTelemetry) -> Result<(), anyhow::Error> {
        Ok(())
    }
}

/// Hands a failure record to `sink`. Sink errors and panics are logged at debug and dropped.
pub(crate) fn emit_failure(sink: &dyn TelemetrySink, failure: &QueryFailure) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| sink.record_failure(failure)));
    log_sink_result("failure", result);
}

/// Hands the run counts to `sink`. Sink errors and panics are logged at debug and dropped.
pub(crate) fn emit_run(sink: &dyn TelemetrySink, run: &RunTelemetry) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| sink.record_run(run)));
    log_sink_result("run", result);
}

fn log_sink_result(record: &str, result: std::thread::Result<Result<(), anyhow::Error>>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => debug!(record = record, error = %e, "Telemetry sink rejected record"),
        Err(_) => debug!(record = record, "Telemetry sink panicked"),
    }
}
