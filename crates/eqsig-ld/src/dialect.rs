//! # Proof Dialects
//!
//! Two attachment conventions share identical cryptographic substance and
//! differ only in where the proof lives on the document and what its fields
//! are called. The pipeline is parameterized by this descriptor instead of
//! being duplicated per dialect.

/// A named variant of the proof attachment convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProofDialect {
    /// Current convention: proof object under `proof`, packed solution
    /// under `proofValue`.
    Proof2018,
    /// Legacy convention: proof object under `signature`, packed solution
    /// under `signatureValue`.
    Signature2017,
}

impl ProofDialect {
    /// The document field the proof object is attached under.
    pub fn attachment_field(&self) -> &'static str {
        match self {
            ProofDialect::Proof2018 => "proof",
            ProofDialect::Signature2017 => "signature",
        }
    }

    /// The attachment field holding the encoded packed solution.
    pub fn value_field(&self) -> &'static str {
        match self {
            ProofDialect::Proof2018 => "proofValue",
            ProofDialect::Signature2017 => "signatureValue",
        }
    }

    /// The `type` tag written into the proof object.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ProofDialect::Proof2018 => "EquihashProof2018",
            ProofDialect::Signature2017 => "EquihashProof2017",
        }
    }

    /// Resolve a proof object's `type` tag back to its dialect.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        match tag {
            "EquihashProof2018" => Some(ProofDialect::Proof2018),
            "EquihashProof2017" => Some(ProofDialect::Signature2017),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProofDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_tag())
    }
}
