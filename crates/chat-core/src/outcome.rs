//! # Query Outcome
//!
//! Result of querying one store pairing. Created by the orchestrator once per pair and
//! discarded after merging and summarizing.
//!
//! Each outcome is one of:
//! - **Succeeded**: the provider returned messages (possibly none)
//! - **Failed**: the provider raised an error or timed out

use serde::Serialize;
use std::fmt;

use crate::error::StoreAccessError;
use crate::types::ChatMessage;

/// Why a pair failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    StoreAccess,
    Timeout,
}

/// Failure descriptor for one pair: store identifier plus a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryFailure {
    pub store_id: String,
    pub kind: FailureKind,
    pub reason: String,
}

impl QueryFailure {
    pub fn store_access(store_id: impl Into<String>, err: &StoreAccessError) -> Self {
        Self {
            store_id: store_id.into(),
            kind: FailureKind::StoreAccess,
            reason: err.to_string(),
        }
    }

    pub fn timeout(store_id: impl Into<String>, timeout_ms: u128) -> Self {
        Self {
            store_id: store_id.into(),
            kind: FailureKind::Timeout,
            reason: format!("timed out after {} ms", timeout_ms),
        }
    }

    /// `"<store_id>: <reason>"`, the form used in `DataQualityReport::failure_reasons`.
    pub fn describe(&self) -> String {
        format!("{}: {}", self.store_id, self.reason)
    }
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Per-pair query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Succeeded {
        store_id: String,
        messages: Vec<ChatMessage>,
    },
    Failed(QueryFailure),
}

impl QueryOutcome {
    pub fn store_id(&self) -> &str {
        match self {
            QueryOutcome::Succeeded { store_id, .. } => store_id,
            QueryOutcome::Failed(failure) => &failure.store_id,
        }
    }

    /// Messages of a successful outcome; empty for failures.
    pub fn messages(&self) -> &[ChatMessage] {
        match self {
            QueryOutcome::Succeeded { messages, .. } => messages,
            QueryOutcome::Failed(_) => &[],
        }
    }

    pub fn failure(&self) -> Option<&QueryFailure> {
        match self {
            QueryOutcome::Succeeded { .. } => None,
            QueryOutcome::Failed(failure) => Some(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Succeeded { .. })
    }
}
