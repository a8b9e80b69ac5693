//! Shared query evaluation for all store backings.
//!
//! Cursor algorithm: a cursor equal to an `event_id` E means "skip every
//! record up to and including E, then apply filters". If E is not present
//! in the store the result is empty with no `next_cursor`.

use trailproof_contracts::{QueryFilters, QueryResult, TrailEvent};

/// Evaluate `filters` against `events` (which must be in insertion order).
pub(crate) fn run_query(events: &[TrailEvent], filters: &QueryFilters) -> QueryResult {
    let start = match &filters.cursor {
        Some(cursor) => match events.iter().position(|e| e.event_id == *cursor) {
            Some(index) => index + 1,
            None => return QueryResult::default(),
        },
        None => 0,
    };

    let matched: Vec<&TrailEvent> = events[start..]
        .iter()
        .filter(|event| matches_filters(event, filters))
        .collect();

    if matched.len() > filters.limit {
        let window = &matched[..filters.limit];
        QueryResult {
            events: window.iter().map(|e| (*e).clone()).collect(),
            next_cursor: window.last().map(|e| e.event_id.clone()),
        }
    } else {
        QueryResult {
            events: matched.into_iter().cloned().collect(),
            next_cursor: None,
        }
    }
}

fn matches_filters(event: &TrailEvent, filters: &QueryFilters) -> bool {
    if let Some(event_type) = &filters.event_type {
        if event.event_type != *event_type {
            return false;
        }
    }
    if let Some(actor_id) = &filters.actor_id {
        if event.actor_id != *actor_id {
            return false;
        }
    }
    if let Some(tenant_id) = &filters.tenant_id {
        if event.tenant_id != *tenant_id {
            return false;
        }
    }
    if let Some(trace_id) = &filters.trace_id {
        if event.trace_id.as_deref() != Some(trace_id.as_str()) {
            return false;
        }
    }
    if let Some(session_id) = &filters.session_id {
        if event.session_id.as_deref() != Some(session_id.as_str()) {
            return false;
        }
    }
    if let Some(from_time) = &filters.from_time {
        if event.timestamp.as_str() < from_time.as_str() {
            return false;
        }
    }
    if let Some(to_time) = &filters.to_time {
        if event.timestamp.as_str() > to_time.as_str() {
            return false;
        }
    }
    true
}
