//! Query filters and result types.

use serde::Serialize;

use crate::event::TrailEvent;

/// Default page size when a query does not specify `limit`.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Filter criteria and pagination parameters for a store query.
///
/// All filters are optional; an empty filter set returns all events up to
/// `limit`. The identifier filters are exact-match. The time range is
/// inclusive on both ends and compared as strings, which is sound because
/// the timestamp format is fixed-width ISO-8601 UTC.
#[derive(Debug, Clone)]
pub struct QueryFilters {
    pub event_type: Option<String>,
    pub actor_id: Option<String>,
    pub tenant_id: Option<String>,
    pub trace_id: Option<String>,
    pub session_id: Option<String>,
    /// Include events with `timestamp >= from_time`.
    pub from_time: Option<String>,
    /// Include events with `timestamp <= to_time`.
    pub to_time: Option<String>,
    /// Maximum number of events returned in one page.
    pub limit: usize,
    /// Resume pagination after the event with this `event_id`.
    pub cursor: Option<String>,
}

impl Default for QueryFilters {
    fn default() -> Self {
        Self {
            event_type: None,
            actor_id: None,
            tenant_id: None,
            trace_id: None,
            session_id: None,
            from_time: None,
            to_time: None,
            limit: DEFAULT_QUERY_LIMIT,
            cursor: None,
        }
    }
}

/// One page of query results.
///
/// `next_cursor` carries the `event_id` of the last event in this page when
/// more matching events remain; pass it back as `QueryFilters::cursor` to
/// fetch the next page.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub events: Vec<TrailEvent>,
    pub next_cursor: Option<String>,
}

/// The outcome of a chain verification pass.
///
/// `broken` holds the zero-based indices of records that failed
/// verification. Once one record breaks, every subsequent index is reported
/// as broken as well — later digests were computed from the tampered
/// predecessor, so nothing after the break can be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyResult {
    pub intact: bool,
    pub total: usize,
    pub broken: Vec<usize>,
}
