//! Data quality summary attached to every chat history result.

use serde::{Deserialize, Serialize};

/// Overall completeness of a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QualityStatus {
    /// Every discovered store was queried successfully.
    Complete,
    /// At least one store failed; the transcript may be missing turns.
    Partial,
    /// No store was discovered. Not an error.
    Empty,
}

impl QualityStatus {
    /// Derives the status from store counts.
    pub fn from_counts(stores_found: usize, stores_failed: usize) -> Self {
        if stores_found == 0 {
            QualityStatus::Empty
        } else if stores_failed == 0 {
            QualityStatus::Complete
        } else {
            QualityStatus::Partial
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityStatus::Complete => "complete",
            QualityStatus::Partial => "partial",
            QualityStatus::Empty => "empty",
        }
    }
}

/// How complete a chat history result is.
///
/// Invariant: `stores_found == stores_queried + stores_failed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataQualityReport {
    pub stores_found: usize,
    pub stores_queried: usize,
    pub stores_failed: usize,
    pub failure_reasons: Vec<String>,
    pub status: QualityStatus,
}

impl DataQualityReport {
    /// Report for a run that discovered no stores.
    pub fn empty() -> Self {
        Self {
            stores_found: 0,
            stores_queried: 0,
            stores_failed: 0,
            failure_reasons: Vec::new(),
            status: QualityStatus::Empty,
        }
    }
}
