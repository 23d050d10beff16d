//! Error types.
//!
//! `ChatHistoryError` is the only error that leaves a run. `StoreAccessError` is returned by
//! session providers and is folded into the data quality report by the orchestrator.

use std::path::PathBuf;
use thiserror::Error;

/// Run-level errors. Per-pair problems never surface as this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatHistoryError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid time window: start {start_ms} is after end {end_ms}")]
    InvalidWindow { start_ms: i64, end_ms: i64 },
}

/// Errors raised while opening or querying one workspace/global store pairing.
///
/// Display strings are short reasons meant for `DataQualityReport::failure_reasons`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreAccessError {
    #[error("store not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("permission denied")]
    PermissionDenied,

    #[error("corrupted store: {0}")]
    Corrupted(String),

    #[error("unsupported schema: {0}")]
    UnsupportedSchema(String),

    #[error("database error: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_reason_is_plain() {
        assert_eq!(StoreAccessError::PermissionDenied.to_string(), "permission denied");
    }

    #[test]
    fn test_missing_reason_names_path() {
        let err = StoreAccessError::Missing(PathBuf::from("/tmp/ws/state.vscdb"));
        assert_eq!(err.to_string(), "store not found: /tmp/ws/state.vscdb");
    }
}
