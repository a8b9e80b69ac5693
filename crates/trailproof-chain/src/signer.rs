//! Optional HMAC-SHA256 event authentication.
//!
//! The MAC commits to the same canonical bytes as the chain digest (without
//! the previous-digest prefix), so signing and hashing share one
//! serialization and a signed record proves origin from a holder of the
//! shared secret. The key is opaque bytes — the UTF-8 of the provided
//! string; the library never rotates, derives, or transforms it.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use trailproof_contracts::{TrailError, TrailResult, TrailEvent};

use crate::canonical::canonical_json;

/// Scheme prefix carried by every signature string.
pub const SIGNATURE_PREFIX: &str = "hmac-sha256:";

type HmacSha256 = Hmac<Sha256>;

/// Compute the signature for an event: `"hmac-sha256:" + hex(HMAC-SHA256)`.
pub fn sign_event(key: &str, event: &TrailEvent) -> String {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(canonical_json(event).as_bytes());

    format!("{SIGNATURE_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
}

/// Verify the signature carried by an event.
///
/// Fails with a signature-kind error when the event carries no signature,
/// when the signature lacks the `hmac-sha256:` prefix, or when the embedded
/// MAC does not match the recomputed one. The MAC comparison goes through
/// `Mac::verify_slice`, which is constant-time in the tag bytes.
pub fn verify_signature(key: &str, event: &TrailEvent) -> TrailResult<()> {
    let Some(signature) = event.signature.as_deref() else {
        return Err(TrailError::Signature {
            reason: format!("event '{}' carries no signature", event.event_id),
        });
    };

    let Some(mac_hex) = signature.strip_prefix(SIGNATURE_PREFIX) else {
        return Err(TrailError::Signature {
            reason: format!("expected '{SIGNATURE_PREFIX}' prefix on event '{}'", event.event_id),
        });
    };

    // A non-hex body can never match a recomputed MAC; report it as the
    // same mismatch rather than a distinct failure.
    let embedded = hex::decode(mac_hex).map_err(|_| TrailError::Signature {
        reason: format!("signature on event '{}' is not valid hex", event.event_id),
    })?;

    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(canonical_json(event).as_bytes());

    mac.verify_slice(&embedded).map_err(|_| TrailError::Signature {
        reason: format!("HMAC mismatch on event '{}'", event.event_id),
    })
}
