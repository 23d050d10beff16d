//! SQLite store access for chat history extraction.
//!
//! ## Modules
//!
//! - [`error`] – Classification of sqlx/IO errors into `StoreAccessError`
//! - [`models`] – JSON payloads stored in the workspace and global stores
//! - [`sqlite_pool`] – Read-only SqlitePoolManager
//! - [`workspace_store`] – Session references from a workspace store
//! - [`global_store`] – Session content from the global store
//! - [`provider`] – SqliteSessionProvider (`SessionProvider` over one pair)
//! - [`discovery`] – FsStoreDiscovery (`StoreDiscovery` over a storage root)

mod discovery;
mod error;
mod global_store;
mod models;
mod provider;
mod sqlite_pool;
mod workspace_store;

#[cfg(test)]
mod models_test;

pub use discovery::{FsStoreDiscovery, GLOBAL_STORE_DIR, STORE_FILE_NAME, WORKSPACE_STORE_DIR};
pub use error::classify_sqlx_error;
pub use global_store::{GlobalStoreReader, GLOBAL_TABLE};
pub use models::{BubbleHeader, BubbleRecord, ComposerIndex, ComposerRef, ComposerSession};
pub use provider::SqliteSessionProvider;
pub use sqlite_pool::SqlitePoolManager;
pub use workspace_store::{WorkspaceStoreReader, COMPOSER_INDEX_KEY, WORKSPACE_TABLE};
