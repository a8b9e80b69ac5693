//! Chain digest computation and link checking.
//!
//! Digest input layout (bytes, in order):
//!   1. the previous digest as UTF-8 bytes (64 ASCII hex chars)
//!   2. the canonical JSON of the event (derived fields excluded)
//!
//! Both functions here are pure and hold no state.

use sha2::{Digest, Sha256};

use trailproof_contracts::{TrailError, TrailResult, TrailEvent};

use crate::canonical::canonical_json;

/// The sentinel `prev_hash` used for the first event in every trail.
///
/// 64 hex zeros — a value that can never be the SHA-256 of real data,
/// making genesis detection unambiguous.
pub const GENESIS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Compute the SHA-256 digest linking an event to its predecessor.
///
/// Returns a lowercase 64-character hex string over
/// `utf8(prev_hash) ∥ canonical_json(event)`. The event's own `hash` field
/// is ignored (it is excluded from the canonical form), so the caller may
/// pass an event with a placeholder there.
pub fn compute_hash(prev_hash: &str, event: &TrailEvent) -> String {
    let canonical = canonical_json(event);

    let mut hasher = Sha256::new();
    hasher.update(prev_hash.as_bytes());
    hasher.update(canonical.as_bytes());

    hex::encode(hasher.finalize())
}

/// Check a single chain link, raising instead of reporting.
///
/// Most callers want `verify_events`, which walks a whole trail and returns
/// a structured result. This is the hard-error variant for callers that
/// treat a single bad link as fatal: it returns `TrailError::Chain` when the
/// event's stored `prev_hash` does not equal `prev_hash`, or when its stored
/// `hash` does not match the recomputed digest.
pub fn verify_link(prev_hash: &str, event: &TrailEvent) -> TrailResult<()> {
    if event.prev_hash != prev_hash {
        return Err(TrailError::Chain {
            reason: format!(
                "event '{}' links to '{}' but the preceding digest is '{}'",
                event.event_id, event.prev_hash, prev_hash
            ),
        });
    }

    let recomputed = compute_hash(prev_hash, event);
    if event.hash != recomputed {
        return Err(TrailError::Chain {
            reason: format!(
                "event '{}' carries digest '{}' but its content digests to '{}'",
                event.event_id, event.hash, recomputed
            ),
        });
    }

    Ok(())
}
