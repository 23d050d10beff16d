//! Collaborator traits for store discovery and per-pair querying.
//!
//! Implemented by `chat-sqlite` (SQLite stores on disk) and by test doubles.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::StoreAccessError;
use crate::pair::StorePair;
use crate::types::{ChatMessage, TimeWindow};

/// Fetches the messages of one store pairing.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns every message whose timestamp lies in `window` (inclusive), in the store's
    /// session order.
    ///
    /// A store with no matching messages returns `Ok(vec![])`. A store that is missing,
    /// corrupted, schema-mismatched or unreadable returns an error, never an empty result.
    async fn fetch_window(
        &self,
        pair: &StorePair,
        window: TimeWindow,
    ) -> Result<Vec<ChatMessage>, StoreAccessError>;
}

/// Finds candidate workspace stores for a workspace root.
///
/// Implementations apply their own freshness filter relative to `window`. Finding nothing
/// is `Ok(vec![])`.
pub trait StoreDiscovery: Send + Sync {
    fn discover_candidate_stores(
        &self,
        workspace_root: &Path,
        window: TimeWindow,
    ) -> Result<Vec<PathBuf>, anyhow::Error>;
}
