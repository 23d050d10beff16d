//! # Merge Engine
//!
//! Combines the message sequences of all successful outcomes into one transcript:
//!
//! 1. Concatenate messages in outcome order (failed outcomes contribute nothing)
//! 2. Deduplicate by identity, choosing one instance with [`prefer_candidate`]
//! 3. Sort by [`chronological_order`]
//!
//! The result does not depend on which provider finished first, and merging an already
//! merged sequence returns it unchanged.

use chat_core::{ChatMessage, QueryOutcome};
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Duplicate tie-break: should `candidate` replace the instance already `kept`?
///
/// The longer content wins as the more complete record; on equal length the first instance
/// seen (earlier outcome) is kept.
pub fn prefer_candidate(kept: &ChatMessage, candidate: &ChatMessage) -> bool {
    candidate.content.len() > kept.content.len()
}

/// Total order: ascending timestamp, then identity.
pub fn chronological_order(a: &ChatMessage, b: &ChatMessage) -> Ordering {
    a.timestamp_ms
        .cmp(&b.timestamp_ms)
        .then_with(|| a.id.cmp(&b.id))
}

/// Merges the messages of `outcomes` into one deduplicated, chronologically ordered sequence.
pub fn merge(outcomes: &[QueryOutcome]) -> Vec<ChatMessage> {
    let mut by_id: HashMap<&str, &ChatMessage> = HashMap::new();
    let mut seen = 0usize;

    for message in outcomes.iter().flat_map(|o| o.messages()) {
        seen += 1;
        match by_id.entry(message.id.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(message);
            }
            Entry::Occupied(mut slot) => {
                if prefer_candidate(slot.get(), message) {
                    slot.insert(message);
                }
            }
        }
    }

    let mut merged: Vec<ChatMessage> = by_id.into_values().cloned().collect();
    merged.sort_by(chronological_order);

    debug!(
        input_count = seen,
        merged_count = merged.len(),
        duplicates = seen - merged.len(),
        "Merged outcome messages"
    );
    merged
}
