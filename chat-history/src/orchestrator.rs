//! # Multi-Source Query Orchestrator
//!
//! Runs one query task per store pair and turns every result, error, timeout or panic into
//! exactly one [`QueryOutcome`].
//!
//! ## Isolation
//!
//! - Each pair runs in its own tokio task under its own timeout
//! - A provider error, timeout or panic only fails that pair
//! - Outcomes are returned in input pair order, whatever order the tasks finish in
//!
//! Dropping the `query_all` future aborts every in-flight task (they live in a `JoinSet`).

use chat_core::{
    ChatMessage, FailureKind, QueryFailure, QueryOutcome, SessionProvider, StorePair,
    TelemetrySink, TimeWindow,
};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, instrument};

use crate::telemetry::{emit_failure, TracingTelemetry};

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives a [`SessionProvider`] over a set of store pairs.
#[derive(Clone)]
pub struct QueryOrchestrator {
    provider: Arc<dyn SessionProvider>,
    timeout: Duration,
    telemetry: Arc<dyn TelemetrySink>,
}

impl QueryOrchestrator {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_QUERY_TIMEOUT,
            telemetry: Arc::new(TracingTelemetry),
        }
    }

    /// Sets the per-pair query timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the sink that receives one record per failed pair.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Queries every pair and returns one outcome per pair, in input order.
    ///
    /// Never fails: per-pair errors are returned as `QueryOutcome::Failed`. No retries.
    #[instrument(
        skip_all,
        fields(
            pair_count = pairs.len(),
            start_ms = window.start_ms(),
            end_ms = window.end_ms(),
            timeout_ms = self.timeout.as_millis() as u64
        )
    )]
    pub async fn query_all(&self, pairs: &[StorePair], window: TimeWindow) -> Vec<QueryOutcome> {
        let mut tasks = JoinSet::new();
        for (index, pair) in pairs.iter().cloned().enumerate() {
            let provider = Arc::clone(&self.provider);
            let timeout = self.timeout;
            tasks.spawn(async move {
                let outcome = query_one(provider, &pair, window, timeout).await;
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<QueryOutcome>> = vec![None; pairs.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => debug!(error = %e, "Query task did not complete"),
            }
        }

        let outcomes: Vec<QueryOutcome> = slots
            .into_iter()
            .zip(pairs)
            .map(|(slot, pair)| {
                slot.unwrap_or_else(|| {
                    QueryOutcome::Failed(QueryFailure {
                        store_id: pair.store_id(),
                        kind: FailureKind::StoreAccess,
                        reason: "query task did not complete".to_string(),
                    })
                })
            })
            .collect();

        for failure in outcomes.iter().filter_map(QueryOutcome::failure) {
            emit_failure(self.telemetry.as_ref(), failure);
        }

        debug!(
            succeeded = outcomes.iter().filter(|o| o.is_success()).count(),
            failed = outcomes.iter().filter(|o| !o.is_success()).count(),
            "All store queries finished"
        );
        outcomes
    }
}

/// Queries a single pair under `timeout`, converting errors and panics into a failure.
async fn query_one(
    provider: Arc<dyn SessionProvider>,
    pair: &StorePair,
    window: TimeWindow,
    timeout: Duration,
) -> QueryOutcome {
    let store_id = pair.store_id();
    let fetch = AssertUnwindSafe(provider.fetch_window(pair, window)).catch_unwind();

    let result: Result<Vec<ChatMessage>, QueryFailure> =
        match tokio::time::timeout(timeout, fetch).await {
            Ok(Ok(Ok(messages))) => Ok(messages),
            Ok(Ok(Err(e))) => {
                debug!(store_id = %store_id, error = %e, "Store query failed");
                Err(QueryFailure::store_access(&store_id, &e))
            }
            Ok(Err(_panic)) => {
                debug!(store_id = %store_id, "Store query panicked");
                Err(QueryFailure {
                    store_id: store_id.clone(),
                    kind: FailureKind::StoreAccess,
                    reason: "query panicked".to_string(),
                })
            }
            Err(_) => {
                debug!(
                    store_id = %store_id,
                    timeout_ms = timeout.as_millis() as u64,
                    "Store query timed out"
                );
                Err(QueryFailure::timeout(&store_id, timeout.as_millis()))
            }
        };

    match result {
        Ok(messages) => {
            debug!(store_id = %store_id, message_count = messages.len(), "Store query succeeded");
            QueryOutcome::Succeeded { store_id, messages }
        }
        Err(failure) => QueryOutcome::Failed(failure),
    }
}
