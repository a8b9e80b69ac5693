//! Volatile in-memory store.

use std::sync::Mutex;

use trailproof_chain::GENESIS_HASH;
use trailproof_contracts::{QueryFilters, QueryResult, TrailError, TrailResult, TrailEvent};

use crate::query::run_query;
use crate::traits::TrailStore;

/// An in-memory store keeping records in an ordered list.
///
/// Records are lost when the process exits. Useful for tests and
/// short-lived applications.
#[derive(Default)]
pub struct MemoryStore {
    events: Mutex<Vec<TrailEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrailStore for MemoryStore {
    fn append(&self, event: TrailEvent) -> TrailResult<()> {
        let mut events = self.events.lock().map_err(|e| TrailError::Store {
            reason: format!("event list lock poisoned: {e}"),
        })?;
        events.push(event);
        Ok(())
    }

    /// Returns a defensive copy so callers cannot mutate internal state.
    fn read_all(&self) -> Vec<TrailEvent> {
        self.events.lock().expect("event list lock poisoned").clone()
    }

    fn query(&self, filters: &QueryFilters) -> QueryResult {
        let events = self.events.lock().expect("event list lock poisoned");
        run_query(&events, filters)
    }

    fn last_hash(&self) -> String {
        let events = self.events.lock().expect("event list lock poisoned");
        events
            .last()
            .map(|e| e.hash.clone())
            .unwrap_or_else(|| GENESIS_HASH.to_string())
    }

    fn count(&self) -> usize {
        self.events.lock().expect("event list lock poisoned").len()
    }
}
