//! Error types for the Trailproof library.
//!
//! All fallible operations return `TrailResult<T>`. The four variants map to
//! the four failure categories of the library; the enum itself is the common
//! root for catch-all handlers.

use thiserror::Error;

/// The unified error type for all Trailproof operations.
#[derive(Debug, Error)]
pub enum TrailError {
    /// A required field is missing or empty, or a facade configuration value
    /// is unusable (unknown store kind, jsonl store without a path).
    ///
    /// Always raised before any store mutation.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// A storage operation failed: unreadable trail file at construction, or
    /// a write failure during append. After a failed append the in-memory
    /// mirror is left untouched.
    #[error("store operation failed: {reason}")]
    Store { reason: String },

    /// A hash-chain link did not match during an explicit link check.
    ///
    /// `verify()` never raises this — it reports breaks through the returned
    /// `VerifyResult` so auditors can inspect a broken chain.
    #[error("hash chain mismatch: {reason}")]
    Chain { reason: String },

    /// A signature problem: missing signature where one is required, a
    /// malformed signature prefix, an HMAC mismatch, or a signed record seen
    /// while no signing key is configured.
    #[error("signature verification failed: {reason}")]
    Signature { reason: String },
}

/// Convenience alias used throughout the Trailproof crates.
pub type TrailResult<T> = Result<T, TrailError>;
