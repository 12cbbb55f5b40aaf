//! Selection sync: optimistic persistence with retry, offline replay and
//! per-category serialization.

mod engine;

pub use engine::{SyncEngine, SyncSnapshot};
