//! JSON payloads stored in the key/value tables of the workspace and global stores.
//!
//! Only the fields needed to rebuild a transcript are modeled; unknown fields are ignored.

use chat_core::MessageRole;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Index of chat sessions kept by a workspace store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerIndex {
    #[serde(default)]
    pub all_composers: Vec<ComposerRef>,
}

/// Reference to one chat session whose content lives in the global store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComposerRef {
    pub composer_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub last_updated_at: Option<i64>,
}

impl ComposerRef {
    /// Activity span of the session. Missing bounds are open-ended.
    pub fn activity_span(&self) -> (i64, i64) {
        let lo = self.created_at.unwrap_or(i64::MIN);
        let hi = self.last_updated_at.unwrap_or(i64::MAX);
        (lo, hi.max(lo))
    }
}

/// Session record in the global store; headers give the turn order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerSession {
    #[serde(default)]
    pub full_conversation_headers_only: Option<Vec<BubbleHeader>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BubbleHeader {
    pub bubble_id: String,
    #[serde(default, rename = "type")]
    pub kind: Option<i64>,
}

/// One chat turn ("bubble") in the global store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleRecord {
    #[serde(default, rename = "type")]
    pub kind: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<Value>,
}

impl BubbleRecord {
    /// Type 1 is a user turn, type 2 an assistant turn.
    pub fn role(&self) -> MessageRole {
        role_from_kind(self.kind)
    }

    /// Creation time in epoch milliseconds. Accepts integers, floats, numeric strings and
    /// RFC 3339 strings.
    pub fn timestamp_ms(&self) -> Option<i64> {
        match self.created_at.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    DateTime::parse_from_rfc3339(s)
                        .ok()
                        .map(|dt| dt.timestamp_millis())
                })
            }
            _ => None,
        }
    }
}

pub(crate) fn role_from_kind(kind: Option<i64>) -> MessageRole {
    match kind {
        Some(1) => MessageRole::User,
        Some(2) => MessageRole::Assistant,
        _ => MessageRole::Unknown,
    }
}
