//! # Equihash Engine Trait
//!
//! The abstract interface for Equihash solve/verify backends. The proof
//! pipeline takes an engine as a constructor-supplied capability; nothing
//! in the workspace resolves a backend implicitly.
//!
//! The trait is deliberately open (not sealed): deployments inject their
//! own memory-hard backend, and the [`MockEquihash`](crate::mock::MockEquihash)
//! development engine is just one implementation among them.

use thiserror::Error;

use eqsig_core::Seed;

use crate::cancel::CancelToken;
use crate::params::EquihashParams;

/// Output of a successful proof-of-work search.
///
/// The nonce is engine-chosen and opaque beyond encode/decode. The solution
/// index order is semantically significant — reordering invalidates
/// verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowSolution {
    /// Engine-chosen nonce proving an attempted work unit.
    pub nonce: Vec<u8>,
    /// Ordered 32-bit solution indices; length is `2^k`.
    pub solution: Vec<u32>,
}

/// Error during a proof-of-work search.
#[derive(Error, Debug)]
pub enum SolveError {
    /// The engine cannot operate with the given `(n, k)` combination.
    #[error("unsupported equihash parameters {params}: {reason}")]
    UnsupportedParameters {
        /// The rejected parameter pair.
        params: EquihashParams,
        /// Engine-reported incompatibility.
        reason: String,
    },

    /// The search space was exhausted without finding a solution.
    #[error("no solution found for {0}")]
    NoSolution(EquihashParams),

    /// The caller cancelled the in-flight search.
    #[error("proof-of-work search cancelled")]
    Cancelled,

    /// No Equihash backend is available in this deployment.
    #[error("equihash engine unavailable: {0}")]
    Unavailable(String),

    /// Backend-internal failure.
    #[error("engine failure: {0}")]
    Engine(String),
}

/// Error during proof-of-work verification.
///
/// A cryptographically invalid but well-formed solution is NOT an error —
/// engines report it as a clean `Ok(false)`.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The engine cannot operate with the given `(n, k)` combination.
    #[error("unsupported equihash parameters {params}: {reason}")]
    UnsupportedParameters {
        /// The rejected parameter pair.
        params: EquihashParams,
        /// Engine-reported incompatibility.
        reason: String,
    },

    /// No Equihash backend is available in this deployment.
    #[error("equihash engine unavailable: {0}")]
    Unavailable(String),

    /// Backend-internal failure.
    #[error("engine failure: {0}")]
    Engine(String),
}

/// Abstract interface for an Equihash solve/verify backend.
///
/// Implementations are pure functions of their inputs plus the search's
/// internal randomness; they hold no per-call state, so one engine instance
/// may serve arbitrarily many concurrent solve and verify calls.
pub trait EquihashEngine: Send + Sync {
    /// Search for a solution to the puzzle defined by `seed` and `params`.
    ///
    /// Long-running; implementations poll `cancel` and return
    /// [`SolveError::Cancelled`] promptly once it trips. The engine decides
    /// for itself whether a parameter combination is solvable and reports
    /// incompatibility through [`SolveError::UnsupportedParameters`].
    fn solve(
        &self,
        seed: &Seed,
        params: EquihashParams,
        cancel: &CancelToken,
    ) -> Result<PowSolution, SolveError>;

    /// Check a claimed solution against `seed` and `params`.
    ///
    /// Returns `Ok(true)` for a valid solution, `Ok(false)` for an invalid
    /// one (wrong indices, wrong order, wrong length — including empty),
    /// and `Err` only when the engine itself cannot evaluate the claim.
    fn verify(
        &self,
        seed: &Seed,
        params: EquihashParams,
        nonce: &[u8],
        solution: &[u32],
    ) -> Result<bool, VerifyError>;
}

/// An engine standing in for a missing Equihash backend.
///
/// Deployments without a solver install this so that sign and verify fail
/// fast with a distinguishable capability error instead of encoding
/// environment checks into pipeline logic.
#[derive(Debug, Clone)]
pub struct UnavailableEngine {
    reason: String,
}

impl UnavailableEngine {
    /// Create an unavailable engine with a diagnostic reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableEngine {
    fn default() -> Self {
        Self::new("no equihash backend configured")
    }
}

impl EquihashEngine for UnavailableEngine {
    fn solve(
        &self,
        _seed: &Seed,
        _params: EquihashParams,
        _cancel: &CancelToken,
    ) -> Result<PowSolution, SolveError> {
        Err(SolveError::Unavailable(self.reason.clone()))
    }

    fn verify(
        &self,
        _seed: &Seed,
        _params: EquihashParams,
        _nonce: &[u8],
        _solution: &[u32],
    ) -> Result<bool, VerifyError> {
        Err(VerifyError::Unavailable(self.reason.clone()))
    }
}

/// The workspace's default engine.
///
/// With the `mock` feature (the default) this is the deterministic
/// [`MockEquihash`](crate::mock::MockEquihash) development engine; without
/// it, an [`UnavailableEngine`] that reports the missing capability.
pub fn default_engine() -> std::sync::Arc<dyn EquihashEngine> {
    #[cfg(feature = "mock")]
    {
        std::sync::Arc::new(crate::mock::MockEquihash)
    }
    #[cfg(not(feature = "mock"))]
    {
        std::sync::Arc::new(UnavailableEngine::default())
    }
}
