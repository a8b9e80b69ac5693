//! # trailproof-store
//!
//! Append-only storage backings for the Trailproof audit trail.
//!
//! The [`TrailStore`] trait is the capability surface the facade depends
//! on: append, read-all, filtered query, last-digest, count, flush. Two
//! backings implement it:
//!
//! - [`MemoryStore`] — volatile, ordered in-memory list
//! - [`JsonlStore`] — durable line-delimited JSON file with crash-aware
//!   recovery and corrupt-record skipping

pub mod jsonl;
pub mod memory;
mod query;
pub mod traits;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use traits::TrailStore;

// ── Test helpers shared across this crate's test modules ─────────────────────

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::{json, Map};

    use trailproof_chain::GENESIS_HASH;
    use trailproof_contracts::TrailEvent;

    /// A well-formed record with a chosen id and hash. Stores never inspect
    /// digests, so placeholder hashes are fine here.
    pub fn make_event(event_id: &str, hash: &str) -> TrailEvent {
        let mut payload = Map::new();
        payload.insert("key".to_string(), json!("value"));
        TrailEvent {
            event_id: event_id.to_string(),
            event_type: "test.event".to_string(),
            timestamp: "2025-01-01T00:00:00.000Z".to_string(),
            actor_id: "actor-1".to_string(),
            tenant_id: "tenant-1".to_string(),
            payload,
            prev_hash: GENESIS_HASH.to_string(),
            hash: hash.to_string(),
            trace_id: None,
            session_id: None,
            signature: None,
        }
    }
}
