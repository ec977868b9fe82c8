//! # eqsig-pow — Proof-of-Work Boundary for the Equihash Proof Stack
//!
//! This crate defines the external-collaborator contract around the
//! memory-hard collision search:
//!
//! - **[`EquihashEngine`]** — the solve/verify trait the proof pipeline
//!   consumes as an injected capability.
//! - **[`EquihashParams`]** — the `(n, k)` cost pair.
//! - **[`codec`]** — the bit-exact wire codec for solutions (big-endian
//!   packed `u32`s, base64) and nonces.
//! - **[`CancelToken`]** — cooperative cancellation for in-flight searches.
//! - **[`MockEquihash`]** — deterministic development engine behind the
//!   default `mock` feature; [`UnavailableEngine`] stands in when no
//!   backend is configured.
//!
//! The internal search algorithm of a real backend is out of scope here;
//! only its external contract and the encoding wrapped around it live in
//! this crate.

pub mod cancel;
pub mod codec;
pub mod engine;
pub mod params;

#[cfg(feature = "mock")]
pub mod mock;

// Re-export primary types.
pub use cancel::CancelToken;
pub use codec::CodecError;
pub use engine::{
    default_engine, EquihashEngine, PowSolution, SolveError, UnavailableEngine, VerifyError,
};
pub use params::EquihashParams;

#[cfg(feature = "mock")]
pub use mock::MockEquihash;
