//! # Chat History Service
//!
//! Runs one extraction end to end for a workspace root and a commit's activity window.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chat_history::{ChatHistoryService, HistoryConfig, TimeWindow};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let service = ChatHistoryService::from_config(&HistoryConfig::with_storage_root("/data/User"))
//!     .with_timeout(Duration::from_secs(5));
//!
//! let window = TimeWindow::new(1_700_000_000_000, 1_700_000_600_000)?;
//! let history = service.fetch(Path::new("/home/me/project"), window).await?;
//! if !history.is_complete() {
//!     eprintln!("transcript may be incomplete: {:?}", history.data_quality.failure_reasons);
//! }
//! # Ok(())
//! # }
//! ```

use chat_core::{
    ChatHistoryError, ChatMessage, DataQualityReport, QualityStatus, RunTelemetry,
    SessionProvider, TelemetrySink, TimeWindow,
};
use chat_sqlite::{FsStoreDiscovery, SqliteSessionProvider};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::HistoryConfig;
use crate::merge::merge;
use crate::orchestrator::QueryOrchestrator;
use crate::quality::summarize;
use crate::resolver::StorePairingResolver;
use crate::telemetry::{emit_run, TracingTelemetry};

/// Final result: the merged transcript plus how complete it is.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatHistory {
    pub messages: Vec<ChatMessage>,
    pub data_quality: DataQualityReport,
}

impl ChatHistory {
    pub fn is_complete(&self) -> bool {
        self.data_quality.status == QualityStatus::Complete
    }
}

/// Resolves store pairs, queries them, merges the messages and reports data quality.
pub struct ChatHistoryService {
    resolver: StorePairingResolver,
    orchestrator: QueryOrchestrator,
    telemetry: Arc<dyn TelemetrySink>,
}

impl ChatHistoryService {
    pub fn new(resolver: StorePairingResolver, provider: Arc<dyn SessionProvider>) -> Self {
        let telemetry: Arc<dyn TelemetrySink> = Arc::new(TracingTelemetry);
        Self {
            resolver,
            orchestrator: QueryOrchestrator::new(provider).with_telemetry(Arc::clone(&telemetry)),
            telemetry,
        }
    }

    /// Default wiring: filesystem discovery and SQLite stores under `config.storage_root`.
    pub fn from_config(config: &HistoryConfig) -> Self {
        let storage_root = config.storage_root.clone().unwrap_or_default();
        let discovery = Arc::new(FsStoreDiscovery::new(storage_root, config.freshness_window));
        let resolver =
            StorePairingResolver::from_storage_root(discovery, config.storage_root.as_deref());

        Self::new(resolver, Arc::new(SqliteSessionProvider::new()))
            .with_timeout(config.query_timeout)
    }

    /// Sets the per-pair query timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.orchestrator = self.orchestrator.with_timeout(timeout);
        self
    }

    /// Sets the sink for per-failure and per-run telemetry.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.orchestrator = self.orchestrator.with_telemetry(Arc::clone(&telemetry));
        self.telemetry = telemetry;
        self
    }

    /// Fetches the chat history of `workspace_root` within `window`.
    ///
    /// Only configuration problems are returned as errors; store failures are reported in
    /// `ChatHistory::data_quality`.
    #[instrument(
        skip_all,
        fields(
            workspace_root = %workspace_root.display(),
            start_ms = window.start_ms(),
            end_ms = window.end_ms()
        )
    )]
    pub async fn fetch(
        &self,
        workspace_root: &Path,
        window: TimeWindow,
    ) -> Result<ChatHistory, ChatHistoryError> {
        debug!("Resolving store pairs");
        let pairs = self.resolver.resolve_pairs(workspace_root, window)?;

        debug!(pair_count = pairs.len(), "Querying store pairs");
        let outcomes = self.orchestrator.query_all(&pairs, window).await;

        debug!("Merging messages");
        let messages = merge(&outcomes);

        debug!("Summarizing data quality");
        let data_quality = summarize(&outcomes);

        let run = RunTelemetry {
            stores_found: data_quality.stores_found,
            stores_queried: data_quality.stores_queried,
            stores_failed: data_quality.stores_failed,
        };
        emit_run(self.telemetry.as_ref(), &run);

        debug!(
            message_count = messages.len(),
            status = data_quality.status.as_str(),
            "Finished chat history run"
        );
        Ok(ChatHistory {
            messages,
            data_quality,
        })
    }

    /// Like [`fetch`](Self::fetch), validating raw window bounds first.
    pub async fn fetch_range(
        &self,
        workspace_root: &Path,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<ChatHistory, ChatHistoryError> {
        let window = TimeWindow::new(start_ms, end_ms)?;
        self.fetch(workspace_root, window).await
    }
}
