//! # trailproof-chain
//!
//! The cryptographic core of Trailproof: canonical serialization, the
//! SHA-256 hash-chain engine, and the optional HMAC-SHA256 authenticator.
//!
//! Every event commits to its predecessor through
//! `hash = SHA-256(prev_hash ∥ canonical_json(event))`. Tampering with any
//! recorded field — even a single byte — changes the recomputed digest and
//! is detected by [`verify_events`], which reports the tampered index and
//! every index after it (later digests were computed from the tampered
//! predecessor).
//!
//! Everything in this crate is a pure function; no state is held anywhere.

pub mod canonical;
pub mod digest;
pub mod signer;
pub mod verify;

pub use canonical::canonical_json;
pub use digest::{compute_hash, verify_link, GENESIS_HASH};
pub use signer::{sign_event, verify_signature, SIGNATURE_PREFIX};
pub use verify::verify_events;

// ── Test helpers shared across this crate's test modules ─────────────────────

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::{json, Map};

    use trailproof_contracts::TrailEvent;

    use crate::digest::{compute_hash, GENESIS_HASH};
    use crate::signer::sign_event;

    /// The fixed sample event behind the golden vectors.
    pub fn make_event() -> TrailEvent {
        let mut payload = Map::new();
        payload.insert("key".to_string(), json!("value"));
        TrailEvent {
            event_id: "evt-001".to_string(),
            event_type: "test.event".to_string(),
            timestamp: "2025-01-01T00:00:00.000Z".to_string(),
            actor_id: "actor-1".to_string(),
            tenant_id: "tenant-1".to_string(),
            payload,
            prev_hash: GENESIS_HASH.to_string(),
            hash: "placeholder".to_string(),
            trace_id: None,
            session_id: None,
            signature: None,
        }
    }

    /// Build a correctly linked chain of `count` events.
    pub fn build_chain(count: usize) -> Vec<TrailEvent> {
        let mut events = Vec::with_capacity(count);
        let mut prev_hash = GENESIS_HASH.to_string();
        for i in 0..count {
            let mut payload = Map::new();
            payload.insert("n".to_string(), json!(i));
            let mut event = TrailEvent {
                event_id: format!("evt-{i:03}"),
                event_type: "test.event".to_string(),
                timestamp: format!("2025-01-01T00:00:{:02}.000Z", i % 60),
                actor_id: "actor-1".to_string(),
                tenant_id: "tenant-1".to_string(),
                payload,
                prev_hash: prev_hash.clone(),
                hash: String::new(),
                trace_id: None,
                session_id: None,
                signature: None,
            };
            event.hash = compute_hash(&prev_hash, &event);
            prev_hash = event.hash.clone();
            events.push(event);
        }
        events
    }

    /// Build a correctly linked chain where every record is signed.
    pub fn build_signed_chain(count: usize, key: &str) -> Vec<TrailEvent> {
        let mut events = build_chain(count);
        for event in &mut events {
            event.signature = Some(sign_event(key, event));
        }
        events
    }
}
