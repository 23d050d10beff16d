//! Filesystem discovery of workspace stores under an editor storage root.
//!
//! Layout:
//!
//! ```text
//! <storage_root>/
//!   globalStorage/state.vscdb
//!   workspaceStorage/<hash>/state.vscdb
//!   workspaceStorage/<hash>/workspace.json   {"folder": "file:///abs/path"}
//! ```

use chat_core::{StoreDiscovery, TimeWindow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};
use tracing::{debug, info};
use url::Url;

pub const GLOBAL_STORE_DIR: &str = "globalStorage";
pub const WORKSPACE_STORE_DIR: &str = "workspaceStorage";
pub const STORE_FILE_NAME: &str = "state.vscdb";

const WORKSPACE_DESCRIPTOR: &str = "workspace.json";

#[derive(Debug, Deserialize)]
struct WorkspaceDescriptor {
    #[serde(default)]
    folder: Option<String>,
}

/// Finds workspace stores whose descriptor points at a workspace root and that were modified
/// within `freshness` before the start of the query window.
#[derive(Debug, Clone)]
pub struct FsStoreDiscovery {
    storage_root: PathBuf,
    freshness: Duration,
}

impl FsStoreDiscovery {
    pub fn new(storage_root: impl Into<PathBuf>, freshness: Duration) -> Self {
        Self {
            storage_root: storage_root.into(),
            freshness,
        }
    }

    /// Well-known location of the global store under `storage_root`.
    pub fn global_store_path(storage_root: &Path) -> PathBuf {
        storage_root.join(GLOBAL_STORE_DIR).join(STORE_FILE_NAME)
    }

    fn is_fresh(&self, store: &Path, window: TimeWindow) -> bool {
        let modified_ms = match fs::metadata(store).and_then(|m| m.modified()) {
            Ok(modified) => match modified.duration_since(UNIX_EPOCH) {
                Ok(d) => d.as_millis() as i64,
                Err(_) => return false,
            },
            Err(e) => {
                debug!(path = %store.display(), error = %e, "Cannot read store mtime");
                return false;
            }
        };
        let cutoff = window
            .start_ms()
            .saturating_sub(self.freshness.as_millis() as i64);
        modified_ms >= cutoff
    }

    fn workspace_folder(dir: &Path) -> Option<PathBuf> {
        let raw = fs::read_to_string(dir.join(WORKSPACE_DESCRIPTOR)).ok()?;
        let descriptor: WorkspaceDescriptor = serde_json::from_str(&raw).ok()?;
        let folder = descriptor.folder?;
        let url = Url::parse(&folder).ok()?;
        url.to_file_path().ok()
    }
}

fn normalize(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

impl StoreDiscovery for FsStoreDiscovery {
    fn discover_candidate_stores(
        &self,
        workspace_root: &Path,
        window: TimeWindow,
    ) -> Result<Vec<PathBuf>, anyhow::Error> {
        let workspace_dir = self.storage_root.join(WORKSPACE_STORE_DIR);
        let entries = match fs::read_dir(&workspace_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %workspace_dir.display(), "No workspace storage directory");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let target = normalize(workspace_root);
        let mut stores = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable workspace storage entry");
                    continue;
                }
            };
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }
            let Some(folder) = Self::workspace_folder(&dir) else {
                continue;
            };
            if normalize(&folder) != target {
                continue;
            }
            let store = dir.join(STORE_FILE_NAME);
            if !store.is_file() {
                debug!(path = %store.display(), "Workspace entry has no store file");
                continue;
            }
            if !self.is_fresh(&store, window) {
                debug!(path = %store.display(), "Skipping stale workspace store");
                continue;
            }
            stores.push(store);
        }

        stores.sort();
        info!(
            workspace_root = %workspace_root.display(),
            store_count = stores.len(),
            "Discovered candidate workspace stores"
        );
        Ok(stores)
    }
}
