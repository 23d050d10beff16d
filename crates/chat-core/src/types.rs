//! # Core Types
//!
//! This module defines the message and time window types shared by every crate.
//!
//! ## MessageRole
//!
//! Author category of a chat turn.
//!
//! ### Variants
//!
//! - `User`: Message typed by the user
//! - `Assistant`: Message produced by the AI assistant
//! - `System`: System-level message
//! - `Unknown`: The store did not say
//!
//! ## ChatMessage
//!
//! A single chat turn returned by a session provider.
//!
//! ## TimeWindow
//!
//! Inclusive `[start_ms, end_ms]` window, in epoch milliseconds.

use serde::{Deserialize, Serialize};

use crate::error::ChatHistoryError;

/// Represents the author of a chat turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
    Unknown,
}

/// A single chat turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Stable identity, unique within the originating store
    pub id: String,
    /// When the turn was written, epoch milliseconds
    pub timestamp_ms: i64,
    /// Author category
    pub role: MessageRole,
    /// Opaque text payload
    pub content: String,
    /// Workspace store pairing that produced this message
    pub source_store_id: String,
    /// Session the turn belongs to, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Human-readable session title, when the store carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
}

impl ChatMessage {
    /// Creates a message without session association.
    pub fn new(
        id: impl Into<String>,
        timestamp_ms: i64,
        role: MessageRole,
        content: impl Into<String>,
        source_store_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp_ms,
            role,
            content: content.into(),
            source_store_id: source_store_id.into(),
            session_id: None,
            session_name: None,
        }
    }

    /// Associates the message with a session.
    pub fn with_session(mut self, session_id: impl Into<String>, name: Option<String>) -> Self {
        self.session_id = Some(session_id.into());
        self.session_name = name;
        self
    }
}

/// Inclusive time window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start_ms: i64,
    end_ms: i64,
}

impl TimeWindow {
    /// Creates a window; fails when `start_ms > end_ms`.
    pub fn new(start_ms: i64, end_ms: i64) -> Result<Self, ChatHistoryError> {
        if start_ms > end_ms {
            return Err(ChatHistoryError::InvalidWindow { start_ms, end_ms });
        }
        Ok(Self { start_ms, end_ms })
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    /// True when `ts_ms` lies inside the window, both ends included.
    pub fn contains(&self, ts_ms: i64) -> bool {
        ts_ms >= self.start_ms && ts_ms <= self.end_ms
    }

    /// True when `[lo_ms, hi_ms]` shares at least one instant with the window.
    pub fn overlaps(&self, lo_ms: i64, hi_ms: i64) -> bool {
        lo_ms <= self.end_ms && hi_ms >= self.start_ms
    }
}
