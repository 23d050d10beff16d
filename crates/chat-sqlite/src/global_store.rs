//! Global store reader: session content shared by every workspace.
//!
//! Keys:
//! - `composerData:<composerId>` – session record with the ordered turn headers
//! - `bubbleId:<composerId>:<bubbleId>` – one turn

use chat_core::StoreAccessError;
use std::collections::HashMap;
use std::path::Path;

use crate::error::classify_sqlx_error;
use crate::models::{BubbleRecord, ComposerSession};
use crate::sqlite_pool::{open_store, SqlitePoolManager};

pub const GLOBAL_TABLE: &str = "cursorDiskKV";

pub struct GlobalStoreReader {
    pool_manager: SqlitePoolManager,
}

impl GlobalStoreReader {
    pub async fn open(path: &Path) -> Result<Self, StoreAccessError> {
        open_store(path, GLOBAL_TABLE).await.map(Self::from_pool)
    }

    /// Wraps an already opened pool.
    pub(crate) fn from_pool(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    /// Session record for `composer_id`; `None` when the global store has no such session.
    pub async fn session(
        &self,
        composer_id: &str,
    ) -> Result<Option<ComposerSession>, StoreAccessError> {
        let key = format!("composerData:{}", composer_id);
        let Some(raw) = self.value(&key).await? else {
            return Ok(None);
        };
        let session = serde_json::from_str(&raw)
            .map_err(|e| StoreAccessError::Corrupted(format!("{}: {}", key, e)))?;
        Ok(Some(session))
    }

    /// All turns stored for `composer_id`, keyed by bubble id.
    pub async fn bubbles(
        &self,
        composer_id: &str,
    ) -> Result<HashMap<String, BubbleRecord>, StoreAccessError> {
        let path = self.pool_manager.path();
        let prefix = format!("bubbleId:{}:", composer_id);
        let rows: Vec<(String, Option<String>)> = sqlx::query_as(
            "SELECT key, CAST(value AS TEXT) FROM cursorDiskKV \
             WHERE substr(key, 1, length(?1)) = ?1",
        )
        .bind(&prefix)
        .fetch_all(self.pool_manager.pool())
        .await
        .map_err(|e| classify_sqlx_error(&e, path))?;

        let mut bubbles = HashMap::with_capacity(rows.len());
        for (key, value) in rows {
            let Some(value) = value else { continue };
            let bubble: BubbleRecord = serde_json::from_str(&value)
                .map_err(|e| StoreAccessError::Corrupted(format!("{}: {}", key, e)))?;
            bubbles.insert(key[prefix.len()..].to_string(), bubble);
        }
        Ok(bubbles)
    }

    async fn value(&self, key: &str) -> Result<Option<String>, StoreAccessError> {
        let path = self.pool_manager.path();
        let raw: Option<Option<String>> =
            sqlx::query_scalar("SELECT CAST(value AS TEXT) FROM cursorDiskKV WHERE key = ?")
                .bind(key)
                .fetch_optional(self.pool_manager.pool())
                .await
                .map_err(|e| classify_sqlx_error(&e, path))?;
        Ok(raw.flatten())
    }

    pub async fn close(&self) {
        self.pool_manager.close().await;
    }
}
