//! # Signature Suite Adapter
//!
//! Exposes the proof pipeline through a pluggable signature-suite
//! interface: suites are registered by algorithm name and a registry
//! handles the document↔proof-set splicing, single-vs-array `proof`
//! polymorphism, multi-proof documents, and proof selection by type tag.
//!
//! Equihash proofs carry no key material, so the key-resolution hook every
//! suite must answer is stubbed to always succeed for this proof type; the
//! rest of the framework behavior (splicing, selection) applies unchanged.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use eqsig_pow::{CancelToken, EquihashParams};

use crate::attachment::ProofAttachment;
use crate::dialect::ProofDialect;
use crate::error::ProofError;
use crate::pipeline::{ProofPipeline, VerificationOutcome};

/// Options for a suite-mediated signing operation.
#[derive(Debug, Clone)]
pub struct SignOptions {
    /// Equihash cost parameters for the new proof.
    pub parameters: EquihashParams,
    /// Cancellation token observed during the solve.
    pub cancel: CancelToken,
}

impl SignOptions {
    /// Options with the given parameters and a token that never trips.
    pub fn new(parameters: EquihashParams) -> Self {
        Self {
            parameters,
            cancel: CancelToken::new(),
        }
    }
}

/// The outcome of evaluating one proof node from a proof set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteVerification {
    /// The node's `type` tag (empty if the node carried none).
    pub proof_type: String,
    /// Whether the proof verified.
    pub verified: bool,
    /// Error message if the proof could not be evaluated; empty otherwise.
    pub error: String,
}

/// A pluggable signature suite.
///
/// A suite creates and verifies individual proof nodes; the
/// [`SuiteRegistry`] owns everything document-shaped around them.
pub trait SignatureSuite: Send + Sync {
    /// The algorithm name this suite registers under, which is also the
    /// `type` tag of the proof nodes it produces.
    fn algorithm(&self) -> &'static str;

    /// The document field this suite's proofs are spliced under.
    fn attachment_field(&self) -> &'static str;

    /// Resolve and check key material for a proof node.
    ///
    /// Suites whose proofs are not key-based answer `Ok(())`
    /// unconditionally.
    fn check_key(&self, proof_node: &Value) -> Result<(), ProofError>;

    /// Create a proof node over a document stripped of its proof set.
    fn create_proof(
        &self,
        unsigned_document: &Value,
        options: &SignOptions,
    ) -> Result<Value, ProofError>;

    /// Evaluate one proof node against a document stripped of its proof set.
    fn verify_proof(
        &self,
        unsigned_document: &Value,
        proof_node: &Value,
    ) -> Result<VerificationOutcome, ProofError>;
}

/// The Equihash proof suite: the [`ProofPipeline`] behind the pluggable
/// interface.
pub struct EquihashSuite {
    pipeline: ProofPipeline,
}

impl EquihashSuite {
    /// Wrap a pipeline as a registerable suite.
    pub fn new(pipeline: ProofPipeline) -> Self {
        Self { pipeline }
    }

    /// The suite for the current `proof`/`proofValue` convention, with
    /// default capabilities.
    pub fn with_defaults() -> Self {
        Self::new(ProofPipeline::with_defaults(ProofDialect::Proof2018))
    }
}

impl SignatureSuite for EquihashSuite {
    fn algorithm(&self) -> &'static str {
        self.pipeline.dialect().type_tag()
    }

    fn attachment_field(&self) -> &'static str {
        self.pipeline.dialect().attachment_field()
    }

    /// This proof type has no key material; key fetching and checking are
    /// no-ops that always succeed.
    fn check_key(&self, _proof_node: &Value) -> Result<(), ProofError> {
        Ok(())
    }

    fn create_proof(
        &self,
        unsigned_document: &Value,
        options: &SignOptions,
    ) -> Result<Value, ProofError> {
        self.pipeline
            .create_attachment(unsigned_document, options.parameters, &options.cancel)
            .map(|attachment| attachment.to_value())
    }

    fn verify_proof(
        &self,
        unsigned_document: &Value,
        proof_node: &Value,
    ) -> Result<VerificationOutcome, ProofError> {
        let attachment = ProofAttachment::from_value(proof_node, self.pipeline.dialect())?;
        self.pipeline.verify_attachment(unsigned_document, &attachment)
    }
}

/// Normalize a proof-set value to a list of nodes.
///
/// The attachment field may hold a single proof object or an array of
/// them; verifiers see a uniform list either way.
fn proofs_as_list(set: &Value) -> Vec<Value> {
    match set {
        Value::Array(nodes) => nodes.clone(),
        other => vec![other.clone()],
    }
}

/// Add a node to a proof set, converting single to array as needed.
fn push_proof(existing: Option<Value>, node: Value) -> Value {
    match existing {
        None => node,
        Some(Value::Array(mut nodes)) => {
            nodes.push(node);
            Value::Array(nodes)
        }
        Some(single) => Value::Array(vec![single, node]),
    }
}

/// A registry of signature suites keyed by algorithm name.
///
/// Holds no per-call state; registration happens at startup and the
/// registry is then shared freely across concurrent operations.
#[derive(Default)]
pub struct SuiteRegistry {
    suites: Vec<Arc<dyn SignatureSuite>>,
}

impl SuiteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a suite. Name collisions are not checked; the first
    /// registered suite matching an algorithm wins.
    pub fn register(&mut self, suite: Arc<dyn SignatureSuite>) {
        self.suites.push(suite);
    }

    fn find(&self, algorithm: &str) -> Option<&Arc<dyn SignatureSuite>> {
        self.suites.iter().find(|s| s.algorithm() == algorithm)
    }

    /// Sign a document with the named suite, appending to any existing
    /// proof set.
    ///
    /// Every proof in a set is computed over the document *without* the
    /// proof field, so proofs are order-independent of one another.
    pub fn sign(
        &self,
        document: &Value,
        algorithm: &str,
        options: &SignOptions,
    ) -> Result<Value, ProofError> {
        let suite = self.find(algorithm).ok_or_else(|| {
            ProofError::CapabilityUnavailable(format!("no suite registered for {algorithm}"))
        })?;
        let obj = document.as_object().ok_or(ProofError::InvalidDocument)?;

        let field = suite.attachment_field();
        let mut body = obj.clone();
        let existing = body.remove(field);

        let node = suite.create_proof(&Value::Object(body.clone()), options)?;
        body.insert(field.to_string(), push_proof(existing, node));
        Ok(Value::Object(body))
    }

    /// Evaluate every proof the registry has a suite for.
    ///
    /// Returns one result per proof node found under a registered
    /// attachment field; nodes with no matching suite are reported as
    /// failed rather than silently skipped. An empty result set means the
    /// document carried no proofs at all.
    pub fn verify(&self, document: &Value) -> Result<Vec<SuiteVerification>, ProofError> {
        let obj = document.as_object().ok_or(ProofError::InvalidDocument)?;

        let mut fields: Vec<&'static str> = Vec::new();
        for suite in &self.suites {
            if !fields.contains(&suite.attachment_field()) {
                fields.push(suite.attachment_field());
            }
        }

        let mut results = Vec::new();
        for field in fields {
            let Some(set) = obj.get(field) else {
                continue;
            };
            let mut stripped = obj.clone();
            stripped.remove(field);
            let unsigned = Value::Object(stripped);

            for node in proofs_as_list(set) {
                let proof_type = node
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let suite = self
                    .suites
                    .iter()
                    .find(|s| s.algorithm() == proof_type && s.attachment_field() == field);
                let result = match suite {
                    None => SuiteVerification {
                        proof_type: proof_type.clone(),
                        verified: false,
                        error: format!("no suite registered for proof type {proof_type:?}"),
                    },
                    Some(suite) => {
                        match suite
                            .check_key(&node)
                            .and_then(|()| suite.verify_proof(&unsigned, &node))
                        {
                            Ok(outcome) => SuiteVerification {
                                proof_type,
                                verified: outcome.verified,
                                error: String::new(),
                            },
                            Err(e) => SuiteVerification {
                                proof_type,
                                verified: false,
                                error: e.to_string(),
                            },
                        }
                    }
                };
                results.push(result);
            }
        }
        Ok(results)
    }

    /// Evaluate all proofs and collapse to a single outcome.
    ///
    /// Verified only if at least one proof was found and every found proof
    /// verified. A proofless document fails with
    /// [`ProofError::MissingProof`] — zero proofs is never vacuous success.
    pub fn verify_all(&self, document: &Value) -> Result<VerificationOutcome, ProofError> {
        let results = self.verify(document)?;
        if results.is_empty() {
            let field = self
                .suites
                .first()
                .map(|s| s.attachment_field())
                .unwrap_or("proof");
            return Err(ProofError::MissingProof(field));
        }
        Ok(VerificationOutcome {
            verified: results.iter().all(|r| r.verified),
        })
    }
}
