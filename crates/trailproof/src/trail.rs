//! The Trailproof facade: record, query, and verify audit events.

use std::path::PathBuf;

use tracing::{debug, warn};

use trailproof_chain::{compute_hash, sign_event, verify_events};
use trailproof_contracts::{
    EmitRequest, QueryFilters, QueryResult, TrailError, TrailResult, TrailEvent, VerifyResult,
};
use trailproof_store::{JsonlStore, MemoryStore, TrailStore};

use crate::traits::{Clock, EventIdSource, SystemClock, UuidIds};

/// Effective limit used by `get_trace`, well above any realistic trace size.
const TRACE_QUERY_LIMIT: usize = 10_000;

/// Facade construction parameters.
///
/// `store` selects the backing: `"memory"` (the default) or `"jsonl"`, the
/// latter requiring `path`. A configured `signing_key` enables per-event
/// HMAC signing; `default_tenant_id` fills `tenant_id` when a caller omits
/// it at emit.
#[derive(Debug, Clone)]
pub struct TrailConfig {
    pub store: String,
    pub path: Option<PathBuf>,
    pub signing_key: Option<String>,
    pub default_tenant_id: Option<String>,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            store: "memory".to_string(),
            path: None,
            signing_key: None,
            default_tenant_id: None,
        }
    }
}

/// Tamper-evident audit trail using hash chains and optional HMAC signing.
///
/// The main entry point for recording, querying, and verifying events. A
/// facade owns its store for its whole lifetime; records appended through
/// it are immutable thereafter.
///
/// A facade is not safe for concurrent emits from multiple threads: the
/// chain requires a strictly serial "read last digest → append" sequence.
/// Callers needing concurrency must serialize calls externally.
pub struct Trailproof {
    store: Box<dyn TrailStore>,
    signing_key: Option<String>,
    default_tenant_id: Option<String>,
    clock: Box<dyn Clock>,
    ids: Box<dyn EventIdSource>,
}

impl std::fmt::Debug for Trailproof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trailproof")
            .field("signing_key", &self.signing_key)
            .field("default_tenant_id", &self.default_tenant_id)
            .finish_non_exhaustive()
    }
}

impl Trailproof {
    /// Build a facade from `config`.
    ///
    /// The store kind and the jsonl path requirement are validated before
    /// any I/O; an unknown kind or a missing path is a validation error.
    pub fn new(config: TrailConfig) -> TrailResult<Self> {
        let store: Box<dyn TrailStore> = match config.store.as_str() {
            "memory" => Box::new(MemoryStore::new()),
            "jsonl" => {
                let path = config.path.ok_or_else(|| TrailError::Validation {
                    reason: "path is required for the jsonl store".to_string(),
                })?;
                Box::new(JsonlStore::open(path)?)
            }
            other => {
                return Err(TrailError::Validation {
                    reason: format!("unknown store kind '{other}'"),
                })
            }
        };

        Ok(Self {
            store,
            signing_key: config.signing_key,
            default_tenant_id: config.default_tenant_id,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidIds),
        })
    }

    /// A facade over a fresh in-memory store with no key and no default
    /// tenant.
    pub fn in_memory() -> Self {
        Self::new(TrailConfig::default()).expect("memory store construction cannot fail")
    }

    /// Replace the timestamp source. Intended for tests pinning time.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the identifier source. Intended for tests pinning ids.
    pub fn with_id_source(mut self, ids: Box<dyn EventIdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Record a new event in the audit trail.
    ///
    /// # Steps
    ///
    /// 1. Resolve `tenant_id` (request value, falling back to the configured
    ///    default) and reject empty `event_type`, `actor_id`, or tenant.
    /// 2. Generate a fresh `event_id` and UTC millisecond timestamp.
    /// 3. Read the store's last digest — the new record's `prev_hash`.
    /// 4. Compute the chain digest over the completed record.
    /// 5. Sign the record if a key is configured.
    /// 6. Append to the store and return the completed record.
    ///
    /// Validation failures are raised before the store is touched.
    pub fn emit(&self, request: EmitRequest) -> TrailResult<TrailEvent> {
        let tenant_id = request
            .tenant_id
            .or_else(|| self.default_tenant_id.clone())
            .unwrap_or_default();

        require_non_empty("event_type", &request.event_type)?;
        require_non_empty("actor_id", &request.actor_id)?;
        require_non_empty("tenant_id", &tenant_id)?;

        let event_id = self.ids.next_id();
        let timestamp = self.clock.now_iso();
        let prev_hash = self.store.last_hash();

        let mut event = TrailEvent {
            event_id,
            event_type: request.event_type,
            timestamp,
            actor_id: request.actor_id,
            tenant_id,
            payload: request.payload,
            prev_hash: prev_hash.clone(),
            hash: String::new(),
            trace_id: request.trace_id,
            session_id: request.session_id,
            signature: None,
        };

        event.hash = compute_hash(&prev_hash, &event);
        if let Some(key) = &self.signing_key {
            event.signature = Some(sign_event(key, &event));
        }

        self.store.append(event.clone())?;

        debug!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            "event appended to trail"
        );

        Ok(event)
    }

    /// Query events with optional filters and cursor pagination.
    pub fn query(&self, filters: QueryFilters) -> QueryResult {
        self.store.query(&filters)
    }

    /// All events sharing `trace_id`, ordered by timestamp.
    ///
    /// The sort is stable, so events with identical timestamps keep their
    /// insertion order.
    pub fn get_trace(&self, trace_id: &str) -> Vec<TrailEvent> {
        let filters = QueryFilters {
            trace_id: Some(trace_id.to_string()),
            limit: TRACE_QUERY_LIMIT,
            ..QueryFilters::default()
        };
        let mut events = self.store.query(&filters).events;
        events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        events
    }

    /// Verify the integrity of the entire chain and all signatures.
    ///
    /// Hash breaks are reported through the returned result rather than
    /// raised, so auditors can inspect a broken trail. A signed record seen
    /// while no key is configured is raised as a signature error — that is
    /// a configuration fault, not a tamper finding.
    pub fn verify(&self) -> TrailResult<VerifyResult> {
        let events = self.store.read_all();
        let result = verify_events(&events, self.signing_key.as_deref())?;

        if result.intact {
            debug!(total = result.total, "trail verified intact");
        } else {
            warn!(
                total = result.total,
                first_broken = ?result.broken.first(),
                "trail verification found broken records"
            );
        }

        Ok(result)
    }

    /// Number of records in the trail.
    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// Surface any buffered writes to the underlying store.
    pub fn flush(&self) -> TrailResult<()> {
        self.store.flush()
    }
}

fn require_non_empty(field: &str, value: &str) -> TrailResult<()> {
    if value.is_empty() {
        return Err(TrailError::Validation {
            reason: format!("{field} is required and must be non-empty"),
        });
    }
    Ok(())
}
