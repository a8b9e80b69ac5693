//! # trailproof-contracts
//!
//! Shared types and errors for the Trailproof audit trail.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and the unified error type.

pub mod error;
pub mod event;
pub mod query;

pub use error::{TrailError, TrailResult};
pub use event::{EmitRequest, TrailEvent};
pub use query::{QueryFilters, QueryResult, VerifyResult, DEFAULT_QUERY_LIMIT};
