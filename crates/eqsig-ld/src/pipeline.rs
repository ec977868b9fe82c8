//! # Proof Pipeline
//!
//! Orchestrates canonicalize → seed → solve/verify → encode/decode →
//! attach/extract. One pipeline serves both dialects; the dialect
//! descriptor supplies the field names, nothing else differs.
//!
//! ## Security Invariants
//!
//! - **Signing** canonicalizes the document *without* its attachment field,
//!   binds the seed over those bytes, and splices the proof into a fresh
//!   clone. The input document is never mutated.
//! - **Verification** strips the attachment from a clone *before*
//!   canonicalizing, recomputing the exact byte string the signer hashed.
//!   Stripping the wrong field (or stripping after canonicalization) would
//!   reject every proof ever issued.
//! - No state survives a call. Every operation is a pure function of its
//!   explicit inputs, so concurrent sign/verify calls need no coordination.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use eqsig_core::{Canonicalizer, JcsCanonicalizer, Seed};
use eqsig_pow::codec::{decode_nonce, decode_solution, encode_nonce, encode_solution};
use eqsig_pow::{default_engine, CancelToken, EquihashEngine, EquihashParams};

use crate::attachment::ProofAttachment;
use crate::dialect::ProofDialect;
use crate::error::ProofError;

/// The result of evaluating a well-formed proof.
///
/// `verified: false` means the proof was evaluated and found invalid — a
/// clean negative, deliberately distinct from the [`ProofError`] cases in
/// which the proof could not be evaluated at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Whether the proof-of-work solution is valid for this document and
    /// its declared parameters.
    pub verified: bool,
}

/// What sign does when the document already carries an attachment.
///
/// The legacy API rejected such documents; the pluggable-suite path
/// historically replaced the attachment without checking. Both behaviors
/// are legitimate, so the policy is explicit instead of guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Fail with [`ProofError::AlreadyProofed`].
    #[default]
    Reject,
    /// Discard the existing attachment and prove the document afresh.
    Replace,
}

/// The canonicalization-to-proof pipeline.
///
/// Capabilities (canonicalizer, engine) are constructor-supplied; nothing
/// is resolved through globals or environment checks.
pub struct ProofPipeline {
    dialect: ProofDialect,
    canonicalizer: Arc<dyn Canonicalizer>,
    engine: Arc<dyn EquihashEngine>,
    overwrite: OverwritePolicy,
    minimum_params: Option<EquihashParams>,
}

impl ProofPipeline {
    /// Build a pipeline from explicit capabilities.
    pub fn new(
        dialect: ProofDialect,
        canonicalizer: Arc<dyn Canonicalizer>,
        engine: Arc<dyn EquihashEngine>,
    ) -> Self {
        Self {
            dialect,
            canonicalizer,
            engine,
            overwrite: OverwritePolicy::default(),
            minimum_params: None,
        }
    }

    /// Build a pipeline with the JCS canonicalizer and the workspace's
    /// default engine.
    pub fn with_defaults(dialect: ProofDialect) -> Self {
        Self::new(dialect, Arc::new(JcsCanonicalizer), default_engine())
    }

    /// Set the behavior for documents that already carry an attachment.
    pub fn with_overwrite_policy(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    /// Set a cost floor for verification. Attachments declaring parameters
    /// below the floor fail with [`ProofError::WeakParameters`] before any
    /// engine work is spent on them.
    pub fn with_minimum_params(mut self, minimum: EquihashParams) -> Self {
        self.minimum_params = Some(minimum);
        self
    }

    /// The dialect this pipeline attaches and extracts.
    pub fn dialect(&self) -> ProofDialect {
        self.dialect
    }

    /// Prove the document and return a signed clone.
    ///
    /// Equivalent to [`ProofPipeline::sign_cancellable`] with a token that
    /// never trips.
    pub fn sign(&self, document: &Value, params: EquihashParams) -> Result<Value, ProofError> {
        self.sign_cancellable(document, params, &CancelToken::new())
    }

    /// Prove the document, observing a cancellation token during the solve.
    ///
    /// The returned document is a distinct value with exactly one
    /// additional field; the input is untouched.
    pub fn sign_cancellable(
        &self,
        document: &Value,
        params: EquihashParams,
        cancel: &CancelToken,
    ) -> Result<Value, ProofError> {
        let field = self.dialect.attachment_field();
        let obj = document.as_object().ok_or(ProofError::InvalidDocument)?;

        if obj.contains_key(field) && self.overwrite == OverwritePolicy::Reject {
            return Err(ProofError::AlreadyProofed(field));
        }

        // Under Replace the old attachment is dropped here, so the seed is
        // always bound over the proof-free body.
        let mut body = obj.clone();
        body.remove(field);

        let attachment = self.create_attachment(&Value::Object(body.clone()), params, cancel)?;
        body.insert(field.to_string(), attachment.to_value());
        Ok(Value::Object(body))
    }

    /// Evaluate the document's attachment.
    pub fn verify(&self, document: &Value) -> Result<VerificationOutcome, ProofError> {
        let field = self.dialect.attachment_field();
        let obj = document.as_object().ok_or(ProofError::InvalidDocument)?;
        let raw = obj.get(field).ok_or(ProofError::MissingProof(field))?;
        let attachment = ProofAttachment::from_value(raw, self.dialect)?;

        let mut stripped = obj.clone();
        stripped.remove(field);

        self.verify_attachment(&Value::Object(stripped), &attachment)
    }

    /// Produce a proof attachment for a document that carries none.
    ///
    /// This is the shared cryptographic core of both suite modes: the
    /// caller is responsible for having removed any attachment field from
    /// `unsigned_document` first.
    pub fn create_attachment(
        &self,
        unsigned_document: &Value,
        params: EquihashParams,
        cancel: &CancelToken,
    ) -> Result<ProofAttachment, ProofError> {
        let canonical = self.canonicalizer.normalize(unsigned_document)?;
        let seed = Seed::bind(&canonical);
        debug!(%params, seed = %seed, "solving equihash challenge");

        let pow = self
            .engine
            .solve(&seed, params, cancel)
            .map_err(ProofError::from_solve)?;
        debug!(indices = pow.solution.len(), "equihash solution found");

        Ok(ProofAttachment {
            dialect: self.dialect,
            params,
            nonce: encode_nonce(&pow.nonce),
            value: encode_solution(&pow.solution),
        })
    }

    /// Evaluate a parsed attachment against a document stripped of it.
    ///
    /// Parameters come from the attachment itself — verification is
    /// parameter-self-describing, and the optional floor is the only
    /// policy applied here.
    pub fn verify_attachment(
        &self,
        stripped_document: &Value,
        attachment: &ProofAttachment,
    ) -> Result<VerificationOutcome, ProofError> {
        if let Some(minimum) = self.minimum_params {
            if attachment.params.n < minimum.n || attachment.params.k < minimum.k {
                return Err(ProofError::WeakParameters {
                    declared: attachment.params,
                    minimum,
                });
            }
        }

        let canonical = self.canonicalizer.normalize(stripped_document)?;
        let seed = Seed::bind(&canonical);

        let nonce = decode_nonce(&attachment.nonce)?;
        let solution = decode_solution(&attachment.value)?;

        let verified = self
            .engine
            .verify(&seed, attachment.params, &nonce, &solution)
            .map_err(ProofError::from_engine_verify)?;
        if !verified {
            warn!(params = %attachment.params, seed = %seed, "equihash proof rejected");
        }
        Ok(VerificationOutcome { verified })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pipeline(dialect: ProofDialect) -> ProofPipeline {
        ProofPipeline::with_defaults(dialect)
    }

    fn params() -> EquihashParams {
        EquihashParams::new(64, 3)
    }

    #[test]
    fn sign_attaches_exactly_one_field() {
        let doc = json!({"id": "foo:something"});
        let signed = pipeline(ProofDialect::Proof2018).sign(&doc, params()).unwrap();
        let obj = signed.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("proof"));
    }

    #[test]
    fn sign_does_not_mutate_input() {
        let doc = json!({"id": "foo:something"});
        let before = doc.clone();
        let _signed = pipeline(ProofDialect::Proof2018).sign(&doc, params()).unwrap();
        assert_eq!(doc, before);
    }

    #[test]
    fn sign_then_verify_roundtrip() {
        let doc = json!({"id": "foo:something"});
        let pipeline = pipeline(ProofDialect::Proof2018);
        let signed = pipeline.sign(&doc, params()).unwrap();
        let outcome = pipeline.verify(&signed).unwrap();
        assert!(outcome.verified);
    }

    #[test]
    fn verify_missing_attachment_fails() {
        let err = pipeline(ProofDialect::Proof2018)
            .verify(&json!({"id": "unproofed"}))
            .unwrap_err();
        assert!(matches!(err, ProofError::MissingProof("proof")));
    }

    #[test]
    fn sign_rejects_existing_attachment_by_default() {
        let doc = json!({"id": "x"});
        let pipeline = pipeline(ProofDialect::Proof2018);
        let signed = pipeline.sign(&doc, params()).unwrap();
        let err = pipeline.sign(&signed, params()).unwrap_err();
        assert!(matches!(err, ProofError::AlreadyProofed("proof")));
    }

    #[test]
    fn replace_policy_reproofs_and_verifies() {
        let doc = json!({"id": "x"});
        let reject = pipeline(ProofDialect::Proof2018);
        let replace = pipeline(ProofDialect::Proof2018)
            .with_overwrite_policy(OverwritePolicy::Replace);
        let signed = reject.sign(&doc, params()).unwrap();
        let resigned = replace.sign(&signed, params()).unwrap();
        assert!(reject.verify(&resigned).unwrap().verified);
        // One attachment, not two.
        assert_eq!(resigned.as_object().unwrap().len(), 2);
    }

    #[test]
    fn non_object_document_rejected() {
        let pipeline = pipeline(ProofDialect::Proof2018);
        assert!(matches!(
            pipeline.sign(&json!("just a string"), params()),
            Err(ProofError::InvalidDocument)
        ));
        assert!(matches!(
            pipeline.verify(&json!([1, 2, 3])),
            Err(ProofError::InvalidDocument)
        ));
    }

    #[test]
    fn cancelled_token_surfaces_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        let err = pipeline(ProofDialect::Proof2018)
            .sign_cancellable(&json!({"id": "x"}), params(), &token)
            .unwrap_err();
        assert!(matches!(err, ProofError::Cancelled));
    }

    #[test]
    fn weak_parameters_rejected_before_evaluation() {
        let doc = json!({"id": "weak"});
        let signer = pipeline(ProofDialect::Proof2018);
        let signed = signer.sign(&doc, params()).unwrap();

        let strict = pipeline(ProofDialect::Proof2018)
            .with_minimum_params(EquihashParams::new(128, 3));
        match strict.verify(&signed).unwrap_err() {
            ProofError::WeakParameters { declared, minimum } => {
                assert_eq!(declared, params());
                assert_eq!(minimum, EquihashParams::new(128, 3));
            }
            other => panic!("expected WeakParameters, got {other}"),
        }
    }

    #[test]
    fn floor_at_declared_parameters_passes() {
        let doc = json!({"id": "exact"});
        let signer = pipeline(ProofDialect::Proof2018);
        let signed = signer.sign(&doc, params()).unwrap();
        let gated = pipeline(ProofDialect::Proof2018).with_minimum_params(params());
        assert!(gated.verify(&signed).unwrap().verified);
    }

    #[test]
    fn legacy_dialect_uses_signature_field() {
        let doc = json!({"id": "legacy"});
        let pipeline = pipeline(ProofDialect::Signature2017);
        let signed = pipeline.sign(&doc, params()).unwrap();
        let obj = signed.as_object().unwrap();
        assert!(obj.contains_key("signature"));
        assert!(!obj.contains_key("proof"));
        assert_eq!(signed["signature"]["type"], "EquihashProof2017");
        assert!(signed["signature"]["signatureValue"].is_string());
        assert!(pipeline.verify(&signed).unwrap().verified);
    }

    #[test]
    fn dialects_do_not_cross_verify() {
        let doc = json!({"id": "cross"});
        let legacy_signed = pipeline(ProofDialect::Signature2017).sign(&doc, params()).unwrap();
        let err = pipeline(ProofDialect::Proof2018).verify(&legacy_signed).unwrap_err();
        assert!(matches!(err, ProofError::MissingProof("proof")));
    }

    #[test]
    fn unavailable_engine_fails_fast() {
        let pipeline = ProofPipeline::new(
            ProofDialect::Proof2018,
            Arc::new(JcsCanonicalizer),
            Arc::new(eqsig_pow::UnavailableEngine::default()),
        );
        let err = pipeline.sign(&json!({"id": "x"}), params()).unwrap_err();
        assert!(matches!(err, ProofError::CapabilityUnavailable(_)));
    }

    #[test]
    fn float_document_propagates_canonicalization_error() {
        let err = pipeline(ProofDialect::Proof2018)
            .sign(&json!({"amount": 0.5}), params())
            .unwrap_err();
        assert!(matches!(err, ProofError::Canonicalization(_)));
    }
}
