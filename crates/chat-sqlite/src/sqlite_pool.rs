//! Read-only SQLite connection pool wrapper.

use chat_core::StoreAccessError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{classify_io_error, classify_sqlx_error};

/// Manages a single read-only SQLite pool; never creates the database file.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqlitePoolManager {
    /// Opens the database at `path` read-only.
    pub async fn open_read_only(path: &Path) -> Result<Self, sqlx::Error> {
        debug!(path = %path.display(), "Opening SQLite store read-only");

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when a table named `table` exists.
    pub async fn has_table(&self, table: &str) -> Result<bool, sqlx::Error> {
        let found: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }

    /// Closes the pool; pending connections are released.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

/// Opens the store at `path` and checks that `table` exists.
///
/// The file is probed with a plain open first; missing files and permission problems map
/// from the io error.
pub(crate) async fn open_store(
    path: &Path,
    table: &str,
) -> Result<SqlitePoolManager, StoreAccessError> {
    File::open(path).map_err(|e| classify_io_error(&e, path))?;

    let manager = SqlitePoolManager::open_read_only(path)
        .await
        .map_err(|e| classify_sqlx_error(&e, path))?;

    match manager.has_table(table).await {
        Ok(true) => {}
        Ok(false) => {
            manager.close().await;
            return Err(StoreAccessError::UnsupportedSchema(format!(
                "missing table {}",
                table
            )));
        }
        Err(e) => {
            manager.close().await;
            return Err(classify_sqlx_error(&e, path));
        }
    }

    Ok(manager)
}
