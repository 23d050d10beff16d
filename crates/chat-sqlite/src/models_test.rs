//! Unit tests for store payload models.
//!
//! Covers timestamp parsing, role mapping and session activity spans.

use crate::models::{BubbleRecord, ComposerIndex, ComposerRef, ComposerSession};
use chat_core::MessageRole;
use serde_json::json;

#[test]
fn test_bubble_timestamp_from_integer() {
    let bubble: BubbleRecord =
        serde_json::from_value(json!({"type": 1, "text": "hi", "createdAt": 1_700_000_000_123i64}))
            .expect("parse bubble");
    assert_eq!(bubble.timestamp_ms(), Some(1_700_000_000_123));
    assert_eq!(bubble.role(), MessageRole::User);
}

#[test]
fn test_bubble_timestamp_from_rfc3339() {
    let bubble: BubbleRecord = serde_json::from_value(
        json!({"type": 2, "text": "done", "createdAt": "2024-01-02T03:04:05.678Z"}),
    )
    .expect("parse bubble");
    assert_eq!(bubble.timestamp_ms(), Some(1_704_164_645_678));
    assert_eq!(bubble.role(), MessageRole::Assistant);
}

#[test]
fn test_bubble_timestamp_from_numeric_string() {
    let bubble: BubbleRecord =
        serde_json::from_value(json!({"createdAt": "1700000000000"})).expect("parse bubble");
    assert_eq!(bubble.timestamp_ms(), Some(1_700_000_000_000));
    assert_eq!(bubble.role(), MessageRole::Unknown);
}

#[test]
fn test_bubble_without_timestamp() {
    let bubble: BubbleRecord =
        serde_json::from_value(json!({"type": 1, "text": "x"})).expect("parse bubble");
    assert_eq!(bubble.timestamp_ms(), None);

    let bubble: BubbleRecord =
        serde_json::from_value(json!({"createdAt": "yesterday"})).expect("parse bubble");
    assert_eq!(bubble.timestamp_ms(), None);
}

#[test]
fn test_composer_index_ignores_unknown_fields() {
    let index: ComposerIndex = serde_json::from_value(json!({
        "allComposers": [
            {
                "composerId": "c1",
                "name": "Refactor",
                "createdAt": 10,
                "lastUpdatedAt": 20,
                "unifiedMode": "agent"
            }
        ],
        "selectedComposerIds": ["c1"]
    }))
    .expect("parse index");
    assert_eq!(index.all_composers.len(), 1);
    assert_eq!(index.all_composers[0].composer_id, "c1");
    assert_eq!(index.all_composers[0].name.as_deref(), Some("Refactor"));
}

#[test]
fn test_activity_span_open_bounds() {
    let composer = ComposerRef {
        composer_id: "c".to_string(),
        name: None,
        created_at: None,
        last_updated_at: None,
    };
    assert_eq!(composer.activity_span(), (i64::MIN, i64::MAX));

    let composer = ComposerRef {
        created_at: Some(100),
        ..composer
    };
    assert_eq!(composer.activity_span(), (100, i64::MAX));
}

#[test]
fn test_session_headers_optional() {
    let session: ComposerSession = serde_json::from_value(json!({})).expect("parse session");
    assert!(session.full_conversation_headers_only.is_none());
}
