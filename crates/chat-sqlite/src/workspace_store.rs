//! Workspace store reader: lists the chat sessions a workspace references.
//!
//! The workspace store is a key/value table; the session index lives under one well-known key.

use chat_core::StoreAccessError;
use std::path::Path;
use tracing::debug;

use crate::error::classify_sqlx_error;
use crate::models::{ComposerIndex, ComposerRef};
use crate::sqlite_pool::{open_store, SqlitePoolManager};

pub const WORKSPACE_TABLE: &str = "ItemTable";
pub const COMPOSER_INDEX_KEY: &str = "composer.composerData";

pub struct WorkspaceStoreReader {
    pool_manager: SqlitePoolManager,
}

impl WorkspaceStoreReader {
    pub async fn open(path: &Path) -> Result<Self, StoreAccessError> {
        let pool_manager = open_store(path, WORKSPACE_TABLE).await?;
        Ok(Self { pool_manager })
    }

    /// Sessions referenced by this workspace. A store without a session index has none.
    pub async fn composers(&self) -> Result<Vec<ComposerRef>, StoreAccessError> {
        let path = self.pool_manager.path();
        let raw: Option<Option<String>> =
            sqlx::query_scalar("SELECT CAST(value AS TEXT) FROM ItemTable WHERE key = ?")
                .bind(COMPOSER_INDEX_KEY)
                .fetch_optional(self.pool_manager.pool())
                .await
                .map_err(|e| classify_sqlx_error(&e, path))?;

        let Some(raw) = raw.flatten() else {
            debug!(path = %path.display(), "Workspace store has no session index");
            return Ok(Vec::new());
        };

        let index: ComposerIndex = serde_json::from_str(&raw).map_err(|e| {
            StoreAccessError::Corrupted(format!("{}: {}", COMPOSER_INDEX_KEY, e))
        })?;

        debug!(
            path = %path.display(),
            session_count = index.all_composers.len(),
            "Read workspace session index"
        );
        Ok(index.all_composers)
    }

    pub async fn close(&self) {
        self.pool_manager.close().await;
    }
}
