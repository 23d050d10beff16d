//! Store Pairing Resolver.
//!
//! Pairs every candidate workspace store with the single global store. Candidate discovery
//! (including the freshness filter) is delegated to a [`StoreDiscovery`].

use chat_core::{ChatHistoryError, GlobalStore, StoreDiscovery, StorePair, TimeWindow};
use chat_sqlite::FsStoreDiscovery;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub struct StorePairingResolver {
    discovery: Arc<dyn StoreDiscovery>,
    global_store: Option<PathBuf>,
}

impl StorePairingResolver {
    /// Creates a resolver with an explicit global store location. `None` means the location
    /// is unknown and every resolution fails with a configuration error.
    pub fn new(discovery: Arc<dyn StoreDiscovery>, global_store: Option<PathBuf>) -> Self {
        Self {
            discovery,
            global_store,
        }
    }

    /// Creates a resolver whose global store sits at the well-known path under `storage_root`.
    pub fn from_storage_root(
        discovery: Arc<dyn StoreDiscovery>,
        storage_root: Option<&Path>,
    ) -> Self {
        Self::new(
            discovery,
            storage_root.map(FsStoreDiscovery::global_store_path),
        )
    }

    pub fn global_store_path(&self) -> Option<&Path> {
        self.global_store.as_deref()
    }

    /// Resolves the pairs to query for `workspace_root`.
    ///
    /// No candidates is an empty list, not an error. Workspace store paths come back pairwise
    /// distinct, in discovery order, all sharing one `GlobalStore` handle.
    ///
    /// Errors with `Configuration` when the global store location is unknown, and also when
    /// discovery itself fails (e.g. the storage root is unreadable): no pair can be formed then.
    pub fn resolve_pairs(
        &self,
        workspace_root: &Path,
        window: TimeWindow,
    ) -> Result<Vec<StorePair>, ChatHistoryError> {
        let global_path = self.global_store.as_ref().ok_or_else(|| {
            ChatHistoryError::Configuration(
                "global store location could not be determined".to_string(),
            )
        })?;
        let global = GlobalStore::new(global_path.clone());

        let candidates = self
            .discovery
            .discover_candidate_stores(workspace_root, window)
            .map_err(|e| {
                ChatHistoryError::Configuration(format!("workspace store discovery failed: {}", e))
            })?;

        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut pairs = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if candidate == *global_path {
                debug!(path = %candidate.display(), "Dropping global store from candidates");
                continue;
            }
            if !seen.insert(candidate.clone()) {
                debug!(path = %candidate.display(), "Dropping duplicate candidate store");
                continue;
            }
            pairs.push(StorePair::new(candidate, global.clone()));
        }

        info!(
            workspace_root = %workspace_root.display(),
            global_store = %global_path.display(),
            pair_count = pairs.len(),
            "Resolved store pairs"
        );
        Ok(pairs)
    }
}
