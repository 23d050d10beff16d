//! Session provider over one (workspace store, global store) pair.
//!
//! Flow: read the workspace session index, keep sessions active in the window, then load each
//! session's turns from the global store in header order.

use async_trait::async_trait;
use chat_core::{ChatMessage, SessionProvider, StoreAccessError, StorePair, TimeWindow};
use tracing::{debug, instrument};

use crate::global_store::GlobalStoreReader;
use crate::models::{role_from_kind, BubbleRecord, ComposerRef};
use crate::workspace_store::WorkspaceStoreReader;

/// Reads chat sessions from SQLite stores on disk. Stateless; one instance serves every pair.
#[derive(Debug, Clone, Default)]
pub struct SqliteSessionProvider;

impl SqliteSessionProvider {
    pub fn new() -> Self {
        Self
    }

    /// Reads `composers` from `global` and closes it, on success and on error alike.
    async fn read_sessions(
        &self,
        global: GlobalStoreReader,
        store_id: &str,
        composers: &[ComposerRef],
        window: TimeWindow,
    ) -> Result<Vec<ChatMessage>, StoreAccessError> {
        let result = self.collect_messages(&global, store_id, composers, window).await;
        global.close().await;
        result
    }

    async fn collect_messages(
        &self,
        global: &GlobalStoreReader,
        store_id: &str,
        composers: &[ComposerRef],
        window: TimeWindow,
    ) -> Result<Vec<ChatMessage>, StoreAccessError> {
        let mut messages = Vec::new();

        for composer in composers {
            let Some(session) = global.session(&composer.composer_id).await? else {
                debug!(composer_id = %composer.composer_id, "Session missing from global store");
                continue;
            };
            let mut bubbles = global.bubbles(&composer.composer_id).await?;

            // Header order is the session's own turn order; without headers fall back to time.
            let ordered: Vec<(String, Option<i64>, BubbleRecord)> =
                match session.full_conversation_headers_only {
                    Some(headers) => headers
                        .into_iter()
                        .filter_map(|h| {
                            bubbles
                                .remove(&h.bubble_id)
                                .map(|b| (h.bubble_id, h.kind, b))
                        })
                        .collect(),
                    None => {
                        let mut all: Vec<_> = bubbles
                            .into_iter()
                            .map(|(id, b)| (id, None, b))
                            .collect();
                        all.sort_by(|a, b| {
                            a.2.timestamp_ms()
                                .cmp(&b.2.timestamp_ms())
                                .then_with(|| a.0.cmp(&b.0))
                        });
                        all
                    }
                };

            for (bubble_id, header_kind, bubble) in ordered {
                let Some(ts) = bubble.timestamp_ms() else {
                    continue;
                };
                if !window.contains(ts) {
                    continue;
                }
                let text = bubble.text.clone().unwrap_or_default();
                if text.trim().is_empty() {
                    continue;
                }
                let role = match bubble.kind {
                    Some(_) => bubble.role(),
                    None => role_from_kind(header_kind),
                };
                messages.push(
                    ChatMessage::new(
                        format!("{}:{}", composer.composer_id, bubble_id),
                        ts,
                        role,
                        text,
                        store_id,
                    )
                    .with_session(composer.composer_id.clone(), composer.name.clone()),
                );
            }
        }

        Ok(messages)
    }
}

#[async_trait]
impl SessionProvider for SqliteSessionProvider {
    #[instrument(skip(self, pair), fields(store_id = %pair.store_id()))]
    async fn fetch_window(
        &self,
        pair: &StorePair,
        window: TimeWindow,
    ) -> Result<Vec<ChatMessage>, StoreAccessError> {
        let workspace = WorkspaceStoreReader::open(&pair.workspace_store).await?;
        let composers = workspace.composers().await;
        workspace.close().await;

        let active: Vec<ComposerRef> = composers?
            .into_iter()
            .filter(|c| {
                let (lo, hi) = c.activity_span();
                window.overlaps(lo, hi)
            })
            .collect();

        if active.is_empty() {
            debug!("No sessions active in window");
            return Ok(Vec::new());
        }

        let global = GlobalStoreReader::open(pair.global_store.path()).await?;
        let messages = self
            .read_sessions(global, &pair.store_id(), &active, window)
            .await?;
        debug!(
            session_count = active.len(),
            message_count = messages.len(),
            "Fetched messages in window"
        );
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite_pool::SqlitePoolManager;
    use sqlx::sqlite::SqliteConnectOptions;
    use sqlx::SqlitePool;
    use tempfile::TempDir;

    async fn global_store_with(path: &std::path::Path, key: &str, value: &str) {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .expect("Failed to create fixture database");
        sqlx::query("CREATE TABLE cursorDiskKV (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB)")
            .execute(&pool)
            .await
            .expect("Failed to create fixture table");
        sqlx::query("INSERT INTO cursorDiskKV (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&pool)
            .await
            .expect("Failed to insert fixture row");
        pool.close().await;
    }

    fn composer(id: &str) -> ComposerRef {
        ComposerRef {
            composer_id: id.to_string(),
            name: None,
            created_at: None,
            last_updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_global_pool_closed_when_session_is_corrupted() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("state.vscdb");
        global_store_with(&path, "composerData:c1", "{not json").await;

        let manager = SqlitePoolManager::open_read_only(&path)
            .await
            .expect("open");
        let reader = GlobalStoreReader::from_pool(manager.clone());
        let window = TimeWindow::new(0, i64::MAX).expect("window");

        let result = SqliteSessionProvider::new()
            .read_sessions(reader, "/ws/a", &[composer("c1")], window)
            .await;

        assert!(matches!(result, Err(StoreAccessError::Corrupted(_))));
        assert!(manager.is_closed());
    }

    #[tokio::test]
    async fn test_global_pool_closed_after_success() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("state.vscdb");
        global_store_with(&path, "unrelated", "{}").await;

        let manager = SqlitePoolManager::open_read_only(&path)
            .await
            .expect("open");
        let reader = GlobalStoreReader::from_pool(manager.clone());
        let window = TimeWindow::new(0, i64::MAX).expect("window");

        let messages = SqliteSessionProvider::new()
            .read_sessions(reader, "/ws/a", &[composer("c1")], window)
            .await
            .expect("missing session is skipped");

        assert!(messages.is_empty());
        assert!(manager.is_closed());
    }
}
