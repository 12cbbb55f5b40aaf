//! Selection sync domain: queue entry, retry policy and the persistence
//! state machine driven by the sync engine in lb-app.

mod entry;
mod outcome;
mod retry;
mod state;

pub use entry::SyncQueueEntry;
pub use outcome::{DeferReason, PersistOutcome, SyncFailure};
pub use retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};
pub use state::SyncStatus;
