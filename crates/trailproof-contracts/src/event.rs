//! The trail event record and the emit request.
//!
//! `TrailEvent` is the eleven-field envelope that every recorded event is
//! wrapped in. Domain-specific data lives in `payload`, which Trailproof
//! stores and returns verbatim without ever parsing it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single immutable record in the audit trail.
///
/// The first eight fields are mandatory; `trace_id`, `session_id`, and
/// `signature` are optional and omitted from serialized output when absent.
/// `hash` and `signature` are derived fields: they are excluded from the
/// canonical bytes that the digest and the HMAC commit to, which is what
/// allows them to be carried alongside the record.
///
/// Once appended to a store, a record is never mutated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailEvent {
    /// Unique identifier assigned at emit (128-bit random, text-encoded).
    pub event_id: String,

    /// Application-defined namespaced name (e.g. `"billing.invoice.paid"`).
    pub event_type: String,

    /// ISO-8601 UTC timestamp with millisecond precision and a trailing `Z`,
    /// assigned at emit. The fixed-width format makes lexicographic string
    /// comparison agree with chronological order.
    pub timestamp: String,

    /// Who performed the action. Caller-provided, non-empty.
    pub actor_id: String,

    /// Tenant/organization isolation key. Caller-provided, possibly filled
    /// from the facade's configured default.
    pub tenant_id: String,

    /// Domain-specific data. Stored opaquely — never parsed, validated, or
    /// interpreted beyond the canonicalization required for hashing.
    pub payload: Map<String, Value>,

    /// Digest of the preceding event, or the 64-zero genesis digest for the
    /// first record in the trail.
    pub prev_hash: String,

    /// SHA-256 digest (64 lowercase hex chars) of this event's canonical
    /// content prefixed with `prev_hash`. Assigned at emit.
    pub hash: String,

    /// Optional cross-system correlation identifier.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trace_id: Option<String>,

    /// Optional session grouping identifier.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<String>,

    /// Optional keyed-MAC authenticator, `"hmac-sha256:" + 64 hex chars`.
    /// Present iff a signing key was configured at emit.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signature: Option<String>,
}

/// Caller-provided inputs to `Trailproof::emit`.
///
/// `event_type`, `actor_id`, and `payload` are required. `tenant_id` falls
/// back to the facade's configured default when absent.
#[derive(Debug, Clone)]
pub struct EmitRequest {
    pub event_type: String,
    pub actor_id: String,
    pub payload: Map<String, Value>,
    pub tenant_id: Option<String>,
    pub trace_id: Option<String>,
    pub session_id: Option<String>,
}

impl EmitRequest {
    /// Build a request with the three required fields.
    pub fn new(
        event_type: impl Into<String>,
        actor_id: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            actor_id: actor_id.into(),
            payload,
            tenant_id: None,
            trace_id: None,
            session_id: None,
        }
    }

    /// Set an explicit tenant instead of relying on the facade default.
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Attach a cross-system correlation identifier.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Attach a session grouping identifier.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}
