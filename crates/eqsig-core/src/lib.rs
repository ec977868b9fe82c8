#![deny(missing_docs)]

//! # eqsig-core — Foundational Types for the Equihash Proof Stack
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `serde_jcs`, `sha2`, and `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **[`CanonicalBytes`] is the sole path to seed computation.** The
//!    constructor applies float rejection and RFC 8785 (JCS) serialization;
//!    the inner bytes are private, so no seed can be bound to non-canonical
//!    data.
//!
//! 2. **Canonicalization is a seam, not an algorithm.** The proof pipeline
//!    consumes the [`Canonicalizer`] trait; [`JcsCanonicalizer`] is the
//!    shipped implementation and callers may inject an RDF-dataset
//!    canonicalizer instead.
//!
//! 3. **[`Seed`] binding is type-enforced.** `Seed::bind()` only accepts
//!    `&CanonicalBytes`, making the document↔proof binding a compile-time
//!    property.

pub mod canonical;
pub mod error;
pub mod seed;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::{CanonicalBytes, Canonicalizer, JcsCanonicalizer};
pub use error::CanonicalizationError;
pub use seed::Seed;
