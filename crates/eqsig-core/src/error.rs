//! # Error Types
//!
//! Errors raised while producing canonical bytes. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error during canonical serialization.
///
/// Verification seeds are bound to canonical bytes, so a canonicalization
/// failure means no seed can be computed for the document at all. Callers
/// propagate this unchanged rather than folding it into a generic failure.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations. Two
    /// implementations can disagree on the shortest decimal rendering of a
    /// float, which would silently change the seed.
    #[error("float values are not permitted in canonical documents: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
