//! Configuration for chat history extraction.
//!
//! Loaded from environment variables: CHAT_HISTORY_STORAGE_ROOT, CHAT_HISTORY_QUERY_TIMEOUT_MS,
//! CHAT_HISTORY_FRESHNESS_HOURS, LOG_FILE. Loading `.env` (dotenvy) is left to the binary.

use chat_core::ChatHistoryError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::logger::init_tracing;
use crate::orchestrator::DEFAULT_QUERY_TIMEOUT;

pub const DEFAULT_FRESHNESS_HOURS: u64 = 48;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Editor user-data directory holding `globalStorage/` and `workspaceStorage/`
    pub storage_root: Option<PathBuf>,
    /// Upper bound for one pair's query
    pub query_timeout: Duration,
    /// How far before the window a workspace store may have last been written
    pub freshness_window: Duration,
    pub log_file: Option<String>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            freshness_window: Duration::from_secs(DEFAULT_FRESHNESS_HOURS * 3600),
            log_file: None,
        }
    }
}

impl HistoryConfig {
    /// Loads from the process environment; unset variables fall back to defaults.
    pub fn from_env() -> Result<Self, ChatHistoryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChatHistoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(root) = non_empty(lookup("CHAT_HISTORY_STORAGE_ROOT")) {
            config.storage_root = Some(PathBuf::from(root));
        }
        if let Some(ms) = non_empty(lookup("CHAT_HISTORY_QUERY_TIMEOUT_MS")) {
            let ms = parse_positive("CHAT_HISTORY_QUERY_TIMEOUT_MS", &ms)?;
            config.query_timeout = Duration::from_millis(ms);
        }
        if let Some(hours) = non_empty(lookup("CHAT_HISTORY_FRESHNESS_HOURS")) {
            let hours = parse_positive("CHAT_HISTORY_FRESHNESS_HOURS", &hours)?;
            config.freshness_window = Duration::from_secs(hours * 3600);
        }
        config.log_file = non_empty(lookup("LOG_FILE"));

        Ok(config)
    }

    /// Uses the given storage root, other fields default.
    pub fn with_storage_root(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: Some(storage_root.into()),
            ..Self::default()
        }
    }

    /// Installs the tracing subscriber, teed to `log_file` when one is configured.
    pub fn init_logging(&self) -> anyhow::Result<()> {
        init_tracing(self.log_file.as_deref())
    }
}

/// `<config_dir>/Cursor/User` for the current platform.
pub fn default_storage_root() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("Cursor").join("User"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_positive(key: &str, value: &str) -> Result<u64, ChatHistoryError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ChatHistoryError::Configuration(format!(
            "{} must be a positive integer, got {:?}",
            key, value
        ))),
    }
}
