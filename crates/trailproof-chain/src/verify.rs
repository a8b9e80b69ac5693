//! Whole-trail verification: the recompute-and-compare walk.

use trailproof_contracts::{TrailError, TrailResult, TrailEvent, VerifyResult};

use crate::digest::{compute_hash, GENESIS_HASH};
use crate::signer::verify_signature;

/// Walk a record sequence and verify every link and every signature.
///
/// For each record the digest is recomputed from the running previous
/// digest (genesis initially); a record is broken when its stored `hash`
/// does not equal the recomputed digest **or** its stored `prev_hash` does
/// not equal the running digest. After the first break, every subsequent
/// index is reported broken without recomputation — later digests were
/// computed from the tampered predecessor, so nothing after the break can
/// be trusted.
///
/// Signature handling: a signed record seen while `signing_key` is `None`
/// is a configuration fault and returns a signature-kind error — the
/// operator cannot distinguish valid from invalid signatures, so silently
/// passing would be worse than failing. With a key configured, each signed
/// record is MAC-verified and a mismatch breaks the chain at that index.
///
/// An empty sequence is trivially intact.
pub fn verify_events(
    events: &[TrailEvent],
    signing_key: Option<&str>,
) -> TrailResult<VerifyResult> {
    let total = events.len();
    let mut broken: Vec<usize> = Vec::new();
    let mut prev_hash = GENESIS_HASH.to_string();
    let mut chain_broken = false;

    for (index, event) in events.iter().enumerate() {
        if chain_broken {
            broken.push(index);
            continue;
        }

        if event.signature.is_some() && signing_key.is_none() {
            return Err(TrailError::Signature {
                reason: format!(
                    "record {index} carries a signature but no signing key is configured"
                ),
            });
        }

        let expected = compute_hash(&prev_hash, event);
        if event.hash != expected || event.prev_hash != prev_hash {
            broken.push(index);
            chain_broken = true;
            continue;
        }

        if let Some(key) = signing_key {
            if event.signature.is_some() && verify_signature(key, event).is_err() {
                broken.push(index);
                chain_broken = true;
                continue;
            }
        }

        prev_hash = event.hash.clone();
    }

    Ok(VerifyResult {
        intact: broken.is_empty(),
        total,
        broken,
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use crate::signer::sign_event;
    use crate::test_support::{build_chain, build_signed_chain};

    use super::*;

    #[test]
    fn empty_trail_is_intact() {
        let result = verify_events(&[], None).unwrap();
        assert!(result.intact);
        assert_eq!(result.total, 0);
        assert!(result.broken.is_empty());
    }

    #[test]
    fn intact_chain_of_three() {
        let events = build_chain(3);
        let result = verify_events(&events, None).unwrap();
        assert!(result.intact);
        assert_eq!(result.total, 3);
        assert!(result.broken.is_empty());
    }

    #[test]
    fn tampered_payload_breaks_from_that_index() {
        let mut events = build_chain(5);
        events[2].payload.insert("n".to_string(), json!(999));
        let result = verify_events(&events, None).unwrap();
        assert!(!result.intact);
        assert_eq!(result.broken, vec![2, 3, 4]);
    }

    #[test]
    fn tampered_first_event_breaks_everything() {
        let mut events = build_chain(4);
        events[0].actor_id = "mallory".to_string();
        let result = verify_events(&events, None).unwrap();
        assert_eq!(result.broken, vec![0, 1, 2, 3]);
    }

    #[test]
    fn rewritten_hash_is_detected() {
        let mut events = build_chain(2);
        events[0].hash = "deadbeef".repeat(8);
        let result = verify_events(&events, None).unwrap();
        assert!(!result.intact);
        assert_eq!(result.broken, vec![0, 1]);
    }

    #[test]
    fn reordered_records_are_detected() {
        let mut events = build_chain(3);
        events.swap(0, 1);
        let result = verify_events(&events, None).unwrap();
        assert!(!result.intact);
        assert_eq!(result.broken.first(), Some(&0));
    }

    #[test]
    fn deleted_record_is_detected() {
        let mut events = build_chain(3);
        events.remove(1);
        let result = verify_events(&events, None).unwrap();
        assert!(!result.intact);
    }

    #[test]
    fn signed_chain_verifies_with_the_key() {
        let events = build_signed_chain(3, "secret");
        let result = verify_events(&events, Some("secret")).unwrap();
        assert!(result.intact);
    }

    #[test]
    fn signed_record_without_key_is_a_configuration_fault() {
        let events = build_signed_chain(2, "secret");
        let err = verify_events(&events, None).unwrap_err();
        assert!(err.to_string().contains("no signing key"));
    }

    #[test]
    fn wrong_key_breaks_at_the_first_signed_record() {
        let events = build_signed_chain(3, "secret");
        let result = verify_events(&events, Some("other")).unwrap();
        assert!(!result.intact);
        assert_eq!(result.broken, vec![0, 1, 2]);
    }

    #[test]
    fn corrupted_signature_breaks_that_index_and_cascades() {
        let mut events = build_signed_chain(4, "secret");
        // Re-sign record 2 with a different key; the digest still matches
        // (signatures are outside the hashed bytes) but the MAC does not.
        events[2].signature = Some(sign_event("other", &events[2]));
        let result = verify_events(&events, Some("secret")).unwrap();
        assert!(!result.intact);
        assert_eq!(result.broken, vec![2, 3]);
    }

    #[test]
    fn unsigned_records_are_fine_when_a_key_is_configured() {
        let events = build_chain(2);
        let result = verify_events(&events, Some("secret")).unwrap();
        assert!(result.intact);
    }

    proptest! {
        /// Any untampered chain verifies intact.
        #[test]
        fn prop_intact_chain_verifies(count in 1usize..12) {
            let events = build_chain(count);
            let result = verify_events(&events, None).unwrap();
            prop_assert!(result.intact);
            prop_assert_eq!(result.total, count);
        }

        /// Mutating any record breaks exactly that index through the end.
        #[test]
        fn prop_tampering_cascades(
            count in 2usize..10,
            victim in any::<prop::sample::Index>(),
        ) {
            let mut events = build_chain(count);
            let victim = victim.index(count);
            events[victim].payload.insert("tampered".to_string(), json!(true));
            let result = verify_events(&events, None).unwrap();
            prop_assert!(!result.intact);
            prop_assert_eq!(
                result.broken,
                (victim..count).collect::<Vec<_>>()
            );
        }

        /// Tampering the optional trace_id is detected like any other field.
        #[test]
        fn prop_trace_id_is_covered(count in 1usize..8, victim in any::<prop::sample::Index>()) {
            let mut events = build_chain(count);
            let victim = victim.index(count);
            events[victim].trace_id = Some("injected".to_string());
            let result = verify_events(&events, None).unwrap();
            prop_assert!(!result.intact);
            prop_assert_eq!(result.broken.first().copied(), Some(victim));
        }
    }
}
