//! Store pairing types.
//!
//! One `GlobalStore` handle is shared by every `StorePair` of a run; cloning it only bumps a
//! reference count.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable handle to the single global store that holds shared message content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalStore {
    path: Arc<PathBuf>,
}

impl GlobalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when both handles point at the same allocation (not merely equal paths).
    pub fn is_same_handle(&self, other: &GlobalStore) -> bool {
        Arc::ptr_eq(&self.path, &other.path)
    }
}

impl Serialize for GlobalStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.path().serialize(serializer)
    }
}

/// One workspace store paired with the global store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorePair {
    pub workspace_store: PathBuf,
    pub global_store: GlobalStore,
}

impl StorePair {
    pub fn new(workspace_store: impl Into<PathBuf>, global_store: GlobalStore) -> Self {
        Self {
            workspace_store: workspace_store.into(),
            global_store,
        }
    }

    /// Identifier used in diagnostics and failure reasons: the workspace store path.
    pub fn store_id(&self) -> String {
        self.workspace_store.display().to_string()
    }
}

impl fmt::Display for StorePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {}",
            self.workspace_store.display(),
            self.global_store.path().display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_share_global_handle() {
        let global = GlobalStore::new("/data/globalStorage/state.vscdb");
        let a = StorePair::new("/data/workspaceStorage/a/state.vscdb", global.clone());
        let b = StorePair::new("/data/workspaceStorage/b/state.vscdb", global.clone());
        assert!(a.global_store.is_same_handle(&b.global_store));
        assert_eq!(a.store_id(), "/data/workspaceStorage/a/state.vscdb");
    }
}
