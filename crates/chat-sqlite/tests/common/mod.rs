//! Shared fixtures for chat-sqlite integration tests.
//!
//! Builds workspace and global SQLite stores on disk with the same key/value layout the
//! provider reads.

use serde_json::{json, Value};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::path::Path;

/// Creates a key/value store at `path` with one `table` and the given rows.
pub async fn create_kv_store(path: &Path, table: &str, rows: &[(String, Value)]) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options)
        .await
        .expect("Failed to create fixture database");

    sqlx::query(&format!(
        "CREATE TABLE IF NOT EXISTS {} (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB)",
        table
    ))
    .execute(&pool)
    .await
    .expect("Failed to create fixture table");

    for (key, value) in rows {
        sqlx::query(&format!("INSERT INTO {} (key, value) VALUES (?, ?)", table))
            .bind(key)
            .bind(value.to_string())
            .execute(&pool)
            .await
            .expect("Failed to insert fixture row");
    }

    pool.close().await;
}

/// Workspace store whose session index lists `composers`.
pub async fn create_workspace_store(path: &Path, composers: Value) {
    create_kv_store(
        path,
        "ItemTable",
        &[(
            "composer.composerData".to_string(),
            json!({ "allComposers": composers }),
        )],
    )
    .await;
}

/// One turn: (bubble id, type, text, createdAt).
pub type Bubble<'a> = (&'a str, i64, &'a str, i64);

/// Rows for one session in the global store, headers in the given order.
pub fn session_rows(composer_id: &str, bubbles: &[Bubble<'_>]) -> Vec<(String, Value)> {
    let headers: Vec<Value> = bubbles
        .iter()
        .map(|(id, kind, _, _)| json!({ "bubbleId": id, "type": kind }))
        .collect();

    let mut rows = vec![(
        format!("composerData:{}", composer_id),
        json!({ "composerId": composer_id, "fullConversationHeadersOnly": headers }),
    )];
    for (id, kind, text, created_at) in bubbles {
        rows.push((
            format!("bubbleId:{}:{}", composer_id, id),
            json!({ "type": kind, "text": text, "createdAt": created_at }),
        ));
    }
    rows
}

pub async fn create_global_store(path: &Path, rows: &[(String, Value)]) {
    create_kv_store(path, "cursorDiskKV", rows).await;
}
