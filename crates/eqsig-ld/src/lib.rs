//! # eqsig-ld — Equihash Linked-Data Proofs
//!
//! Attaches a memory-hard, asymmetric proof-of-work artifact to a
//! structured document so that producing the artifact requires bounded but
//! non-trivial work while verifying it stays cheap. No keys, no trusted
//! third party: the proof is bound to the document through the SHA-256
//! seed computed over its canonical bytes.
//!
//! Two call shapes are provided over one shared [`ProofPipeline`]:
//!
//! - **Direct**: crate-level [`sign()`] and [`verify()`] over the legacy
//!   `signature` embedding.
//! - **Pluggable**: [`EquihashSuite`] registered with a [`SuiteRegistry`],
//!   which handles proof sets, multi-proof documents, and proof selection
//!   for the `proof` embedding.
//!
//! ```
//! use eqsig_ld::{sign, verify};
//! use eqsig_pow::EquihashParams;
//!
//! let doc = serde_json::json!({"id": "foo:something"});
//! let signed = sign(&doc, EquihashParams::new(64, 3))?;
//! assert!(verify(&signed)?.verified);
//! # Ok::<(), eqsig_ld::ProofError>(())
//! ```

pub mod attachment;
pub mod dialect;
pub mod error;
pub mod pipeline;
pub mod suite;

// Re-export primary types.
pub use attachment::ProofAttachment;
pub use dialect::ProofDialect;
pub use error::ProofError;
pub use pipeline::{OverwritePolicy, ProofPipeline, VerificationOutcome};
pub use suite::{EquihashSuite, SignOptions, SignatureSuite, SuiteRegistry, SuiteVerification};

use serde_json::Value;

use eqsig_pow::EquihashParams;

/// Sign a document with the legacy `signature` embedding and default
/// capabilities.
///
/// Fails with [`ProofError::AlreadyProofed`] if the document already
/// carries a `signature` attachment; use a [`ProofPipeline`] with an
/// explicit [`OverwritePolicy`] for other behavior.
pub fn sign(document: &Value, parameters: EquihashParams) -> Result<Value, ProofError> {
    ProofPipeline::with_defaults(ProofDialect::Signature2017).sign(document, parameters)
}

/// Verify a document signed with the legacy `signature` embedding.
pub fn verify(document: &Value) -> Result<VerificationOutcome, ProofError> {
    ProofPipeline::with_defaults(ProofDialect::Signature2017).verify(document)
}
