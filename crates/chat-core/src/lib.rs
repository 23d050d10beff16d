//! # Chat Core
//!
//! Core types and collaborator traits for extracting chat history that belongs to a commit.
//! Used by the `chat-sqlite` crate (store access) and the `chat-history` crate (orchestration).
//!
//! ## Modules
//!
//! - [`types`] - ChatMessage, MessageRole, TimeWindow
//! - [`pair`] - GlobalStore handle and StorePair
//! - [`outcome`] - QueryOutcome and QueryFailure (per-pair query results)
//! - [`quality`] - DataQualityReport and QualityStatus
//! - [`error`] - ChatHistoryError (run-level) and StoreAccessError (per-pair)
//! - [`provider`] - SessionProvider and StoreDiscovery traits
//! - [`telemetry`] - TelemetrySink trait and RunTelemetry

pub mod error;
pub mod outcome;
pub mod pair;
pub mod provider;
pub mod quality;
pub mod telemetry;
pub mod types;

pub use error::{ChatHistoryError, StoreAccessError};
pub use outcome::{FailureKind, QueryFailure, QueryOutcome};
pub use pair::{GlobalStore, StorePair};
pub use provider::{SessionProvider, StoreDiscovery};
pub use quality::{DataQualityReport, QualityStatus};
pub use telemetry::{RunTelemetry, TelemetrySink};
pub use types::{ChatMessage, MessageRole, TimeWindow};
