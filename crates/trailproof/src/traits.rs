//! Time and identity sources.
//!
//! Both generators are seams: production uses the system clock and a
//! cryptographically acceptable random source, while tests inject fixed
//! timestamps and deterministic identifier sequences through
//! `Trailproof::with_clock` / `Trailproof::with_id_source`.

use chrono::Utc;

/// Supplies the timestamp assigned to each emitted event.
pub trait Clock: Send + Sync {
    /// Current UTC time as fixed-width ISO-8601 with millisecond precision
    /// and a trailing `Z`, e.g. `2025-01-01T00:00:00.000Z`.
    fn now_iso(&self) -> String;
}

/// The wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso(&self) -> String {
        Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }
}

/// Supplies the unique identifier assigned to each emitted event.
pub trait EventIdSource: Send + Sync {
    /// A fresh 128-bit random identifier, text-encoded.
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs.
pub struct UuidIds;

impl EventIdSource for UuidIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
