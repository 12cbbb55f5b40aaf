use std::collections::BTreeSet;

use serde::Serialize;

use super::SyncStatus;
use crate::selection::SelectionCategory;

/// A full desired selection set waiting to be persisted.
///
/// The backend contract is "replace whole set", so the payload is never a
/// delta. One slot exists per category; a newer entry replaces an older one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncQueueEntry {
    pub category: SelectionCategory,
    pub payload: BTreeSet<String>,
    pub attempt: u32,
    pub status: SyncStatus,
    pub enqueued_at_ms: i64,
}

impl SyncQueueEntry {
    pub fn new(category: SelectionCategory, payload: BTreeSet<String>, now_ms: i64) -> Self {
        Self {
            category,
            payload,
            attempt: 0,
            status: SyncStatus::Pending,
            enqueued_at_ms: now_ms,
        }
    }

    pub fn payload_vec(&self) -> Vec<String> {
        self.payload.iter().cloned().collect()
    }

    pub fn queued_offline(mut self) -> Self {
        if let Some(next) = self.status.go_offline() {
            self.status = next;
        }
        self
    }
}
