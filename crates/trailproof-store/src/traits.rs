//! The store capability surface.

use trailproof_contracts::{QueryFilters, QueryResult, TrailResult, TrailEvent};

/// Append-only storage for trail events.
///
/// Implementations must treat `append` as strictly append-only: records
/// written here are never modified or deleted by the library. The trail's
/// hash chain relies on a strictly serial "read `last_hash` → `append`"
/// sequence, so a store instance is written to by one facade at a time;
/// implementations use interior mutability behind `&self` but are not
/// required to coordinate multiple concurrent writers.
pub trait TrailStore: Send + Sync {
    /// Append one complete, hashed record.
    ///
    /// On durable backings the record is on disk when this returns; a failed
    /// write must leave the store's in-memory view untouched.
    fn append(&self, event: TrailEvent) -> TrailResult<()>;

    /// All records in insertion order, as an independent copy.
    fn read_all(&self) -> Vec<TrailEvent>;

    /// Filtered, cursor-paginated view of the records. See `QueryFilters`.
    fn query(&self, filters: &QueryFilters) -> QueryResult;

    /// Digest of the most recent record, or the genesis digest when empty.
    fn last_hash(&self) -> String;

    /// Number of stored records.
    fn count(&self) -> usize;

    /// Surface any buffered writes to the underlying medium.
    ///
    /// The default is a no-op; backings that buffer override it.
    fn flush(&self) -> TrailResult<()> {
        Ok(())
    }
}
