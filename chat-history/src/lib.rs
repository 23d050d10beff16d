//! # Chat History
//!
//! Extracts the chat transcript that belongs to a commit from every workspace store of a
//! project, paired with the one global store that holds message content.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chat_history::{ChatHistoryService, HistoryConfig};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let config = HistoryConfig::from_env()?;
//! config.init_logging()?;
//! let service = ChatHistoryService::from_config(&config);
//!
//! let history = service
//!     .fetch_range(Path::new("/home/me/project"), 1_700_000_000_000, 1_700_003_600_000)
//!     .await?;
//! println!(
//!     "{} messages, status {}",
//!     history.messages.len(),
//!     history.data_quality.status.as_str()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`resolver`] - Store Pairing Resolver
//! - [`orchestrator`] - Multi-Source Query Orchestrator
//! - [`merge`] - Merge Engine (dedup + chronological order)
//! - [`quality`] - Data Quality Reporter
//! - [`service`] - ChatHistoryService, the end-to-end run
//! - [`telemetry`] - Tracing and no-op telemetry sinks
//! - [`config`] - HistoryConfig (environment driven)
//! - [`logger`] - tracing subscriber initialization
//!
//! ## Run stages
//!
//! Resolving pairs → Querying (one task per pair) → Merging → Summarizing → Done.
//! Per-pair failures are data folded into the quality report; only configuration problems
//! surface as errors.

pub mod config;
pub mod logger;
pub mod merge;
pub mod orchestrator;
pub mod quality;
pub mod resolver;
pub mod service;
pub mod telemetry;


pub use chat_core::{
    ChatHistoryError, ChatMessage, DataQualityReport, FailureKind, GlobalStore, MessageRole,
    QualityStatus, QueryFailure, QueryOutcome, RunTelemetry, SessionProvider, StoreAccessError,
    StoreDiscovery, StorePair, TelemetrySink, TimeWindow,
};
pub use config::HistoryConfig;
pub use logger::init_tracing;
pub use merge::{chronological_order, merge, prefer_candidate};
pub use orchestrator::{QueryOrchestrator, DEFAULT_QUERY_TIMEOUT};
pub use quality::summarize;
pub use resolver::StorePairingResolver;
pub use service::{ChatHistory, ChatHistoryService};
pub use telemetry::{NoopTelemetry, TracingTelemetry};
