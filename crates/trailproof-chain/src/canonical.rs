//! Canonical JSON serialization for hashing and signing.
//!
//! Any two implementations on any platform must produce exactly the same
//! bytes for the same logical event. The rules:
//!
//! 1. The derived `hash` and `signature` fields are always omitted.
//! 2. Absent fields are omitted entirely — no `null`-valued keys appear,
//!    recursively through nested objects and through objects inside arrays.
//! 3. Object keys are emitted in lexicographic (code-point) order at every
//!    nesting level.
//! 4. Output is compact JSON: no whitespace, standard string escaping,
//!    shortest round-trip numbers, non-ASCII code points preserved literally.
//!
//! The `hash`/`signature` exclusion applies to the top-level event object
//! only. Payload keys that happen to share those names are payload content
//! and are preserved verbatim.

use serde_json::{Map, Value};

use trailproof_contracts::TrailEvent;

/// Serialize an event to its canonical JSON string.
///
/// `serde_json`'s default map type keeps keys in sorted order, and its
/// compact writer emits shortest round-trip numbers and raw UTF-8, so key
/// ordering and token formatting need no extra handling here — only the
/// derived-field and null removal.
///
/// # Panics
///
/// Panics if the event cannot be serialized to JSON — which cannot happen
/// for the well-formed `TrailEvent` type.
pub fn canonical_json(event: &TrailEvent) -> String {
    let value = serde_json::to_value(event)
        .expect("TrailEvent must always be serializable to JSON");
    let Value::Object(fields) = value else {
        unreachable!("TrailEvent serializes to a JSON object");
    };

    let mut cleaned = Map::new();
    for (key, field_value) in fields {
        if key == "hash" || key == "signature" {
            continue;
        }
        if field_value.is_null() {
            continue;
        }
        cleaned.insert(key, scrub_nulls(field_value));
    }

    Value::Object(cleaned).to_string()
}

/// Remove `null`-valued keys from nested objects, recursing through arrays.
/// Array element order is preserved.
fn scrub_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, scrub_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(scrub_nulls).collect()),
        other => other,
    }
}
