//! # Proof Error Taxonomy
//!
//! Every way signing or verification can fail, as distinguishable variants.
//! A verifier returning a clean `false` is NOT represented here — that is a
//! valid negative outcome reported through
//! [`VerificationOutcome`](crate::pipeline::VerificationOutcome). Errors
//! mean the proof could not even be evaluated.

use thiserror::Error;

use eqsig_core::CanonicalizationError;
use eqsig_pow::{CodecError, EquihashParams, SolveError, VerifyError};

/// Errors from proof pipeline and suite operations.
#[derive(Error, Debug)]
pub enum ProofError {
    /// Sign was called on a document that already carries an attachment
    /// and the pipeline's overwrite policy rejects that.
    #[error("document already carries a {0} attachment")]
    AlreadyProofed(&'static str),

    /// Verify was called on a document lacking the expected attachment.
    #[error("document has no {0} attachment")]
    MissingProof(&'static str),

    /// The attachment is present but structurally unusable: value field
    /// missing or non-text, parameters missing or out of range, or an
    /// encoding that fails byte-length/decoding constraints.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// The external solver could not produce a solution.
    #[error("proof of work failed: {0}")]
    ProofOfWork(#[source] SolveError),

    /// The external verifier itself errored (distinct from returning a
    /// clean negative).
    #[error("verification error: {0}")]
    Verification(#[source] VerifyError),

    /// An in-flight solve was cancelled by the caller.
    #[error("signing cancelled")]
    Cancelled,

    /// No Equihash capability is available in this deployment.
    #[error("equihash capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// Canonicalization failed; propagated unchanged from the collaborator.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),

    /// The attachment target is not a JSON object, so no proof can be
    /// spliced into or extracted from it.
    #[error("document is not a JSON object")]
    InvalidDocument,

    /// The attachment declares cost parameters below the verifier's
    /// configured floor; the proof was not evaluated.
    #[error("declared parameters {declared} below policy minimum {minimum}")]
    WeakParameters {
        /// Parameters declared by the attachment.
        declared: EquihashParams,
        /// The configured acceptance floor.
        minimum: EquihashParams,
    },
}

impl ProofError {
    /// Map a solver failure onto the taxonomy, keeping cancellation and
    /// missing-capability outcomes distinguishable from search failure.
    pub(crate) fn from_solve(err: SolveError) -> Self {
        match err {
            SolveError::Cancelled => ProofError::Cancelled,
            SolveError::Unavailable(reason) => ProofError::CapabilityUnavailable(reason),
            other => ProofError::ProofOfWork(other),
        }
    }

    /// Map an engine verification fault onto the taxonomy.
    pub(crate) fn from_engine_verify(err: VerifyError) -> Self {
        match err {
            VerifyError::Unavailable(reason) => ProofError::CapabilityUnavailable(reason),
            other => ProofError::Verification(other),
        }
    }
}

impl From<CodecError> for ProofError {
    fn from(err: CodecError) -> Self {
        ProofError::MalformedProof(err.to_string())
    }
}
