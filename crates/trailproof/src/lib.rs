//! # trailproof
//!
//! Tamper-evident audit trail for application events.
//!
//! Every recorded event is linked to its predecessor by a SHA-256 digest,
//! so any retroactive modification, reordering, insertion, or deletion is
//! detectable by a later [`Trailproof::verify`] pass. An optional
//! HMAC-SHA256 signing key additionally proves that recorded events
//! originated from a holder of the shared secret.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trailproof::{EmitRequest, TrailConfig, Trailproof};
//!
//! let trail = Trailproof::new(TrailConfig {
//!     store: "jsonl".to_string(),
//!     path: Some("events.jsonl".into()),
//!     default_tenant_id: Some("acme".to_string()),
//!     ..TrailConfig::default()
//! })?;
//!
//! trail.emit(EmitRequest::new("billing.invoice.paid", "alice", payload))?;
//!
//! let report = trail.verify()?;
//! assert!(report.intact);
//! ```

pub mod trail;
pub mod traits;

pub use trail::{TrailConfig, Trailproof};
pub use traits::{Clock, EventIdSource, SystemClock, UuidIds};

pub use trailproof_chain::{
    canonical_json, compute_hash, sign_event, verify_events, verify_link, verify_signature,
    GENESIS_HASH, SIGNATURE_PREFIX,
};
pub use trailproof_contracts::{
    EmitRequest, QueryFilters, QueryResult, TrailError, TrailResult, TrailEvent, VerifyResult,
};
pub use trailproof_store::{JsonlStore, MemoryStore, TrailStore};

// ── Tests ─────────────────────────────────────────────────────────────────────
