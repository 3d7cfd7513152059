//! Event deduplication
//!
//! Collapses repeated identical-content events into occurrence-annotated
//! records and caps the number of distinct contents retained per event type,
//! so very chatty steps produce bounded detail output.
//!
//! Two linear passes:
//! 1. Collapse: walk events in original order, keyed by a SHA-256 hash of
//!    (type, message). First sight creates a record; repeats bump the
//!    occurrence count and push `last_seen` forward. Introduction order of
//!    distinct keys is preserved.
//! 2. Retention: with a positive cap, keep only the last `max_per_type`
//!    distinct keys per event type (the most recently introduced contents),
//!    then re-emit survivors in global introduction order so the output
//!    stays a coherent timeline.

use crate::types::{DedupedEvent, WorkflowEvent};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Content key for one distinct (type, message) pair
///
/// A 256-bit hash keeps collisions between operationally distinct messages
/// at cryptographic negligibility.
type ContentKey = [u8; 32];

fn content_key(event_type: &str, message: &str) -> ContentKey {
    let mut hasher = Sha256::new();
    hasher.update(event_type.as_bytes());
    // Separator byte so ("ab", "c") and ("a", "bc") never share a key
    hasher.update([0u8]);
    hasher.update(message.as_bytes());
    hasher.finalize().into()
}

/// Working record for the collapse pass, before the singleton rule is applied
struct PendingRecord {
    event_time: String,
    event_type: String,
    message: String,
    occurrences: u64,
    first_seen: String,
    last_seen: String,
}

impl PendingRecord {
    fn first_sight(event: &WorkflowEvent) -> Self {
        Self {
            event_time: event.event_time.clone(),
            event_type: event.event_type.clone(),
            message: event.message.clone(),
            occurrences: 1,
            first_seen: event.event_time.clone(),
            last_seen: event.event_time.clone(),
        }
    }

    /// Apply the singleton serialization rule: records seen exactly once are
    /// reported bare
    fn into_deduped(self) -> DedupedEvent {
        if self.occurrences == 1 {
            DedupedEvent {
                event_time: self.event_time,
                event_type: self.event_type,
                message: self.message,
                occurrences: None,
                first_seen: None,
                last_seen: None,
            }
        } else {
            DedupedEvent {
                event_time: self.event_time,
                event_type: self.event_type,
                message: self.message,
                occurrences: Some(self.occurrences),
                first_seen: Some(self.first_seen),
                last_seen: Some(self.last_seen),
            }
        }
    }
}

/// Deduplicate a step's events
///
/// `max_per_type <= 0` means unlimited: every distinct content is retained.
/// Output length is bounded by the number of distinct (type, message) pairs,
/// and per type by `max_per_type` when positive.
pub fn deduplicate<'a, I>(events: I, max_per_type: i64) -> Vec<DedupedEvent>
where
    I: IntoIterator<Item = &'a WorkflowEvent>,
{
    // Collapse pass: insertion-ordered records plus a key -> index map
    let mut records: Vec<PendingRecord> = Vec::new();
    let mut index: HashMap<ContentKey, usize> = HashMap::new();

    for event in events {
        let key = content_key(&event.event_type, &event.message);
        match index.get(&key) {
            Some(&i) => {
                records[i].occurrences += 1;
                records[i].last_seen = event.event_time.clone();
            }
            None => {
                index.insert(key, records.len());
                records.push(PendingRecord::first_sight(event));
            }
        }
    }

    // Retention pass: drop all but the last max_per_type distinct contents
    // per event type, keeping global introduction order for the survivors
    let mut keep = vec![true; records.len()];
    if max_per_type > 0 {
        let cap = max_per_type as usize;
        let mut per_type: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            per_type.entry(record.event_type.as_str()).or_default().push(i);
        }
        for indices in per_type.values() {
            if indices.len() > cap {
                for &i in &indices[..indices.len() - cap] {
                    keep[i] = false;
                }
            }
        }
    }

    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, kept)| kept.then(|| record.into_deduped()))
        .collect()
}
