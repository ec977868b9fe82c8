//! # Proof Attachment
//!
//! The single object a proof operation writes into a document, and the only
//! mutation the pipeline ever makes. The JSON field holding the packed
//! solution is *named* differently per dialect, which is why serialization
//! is dialect-directed rather than a serde derive.

use serde_json::{json, Map, Value};

use eqsig_pow::EquihashParams;

use crate::dialect::ProofDialect;
use crate::error::ProofError;

/// A decoded proof attachment.
///
/// `nonce` and `value` stay in their portable base64 form here; byte-level
/// decoding happens in the pipeline right before the engine call, so a
/// malformed encoding is reported against the verify operation that
/// actually consumed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofAttachment {
    /// The dialect whose field names this attachment uses.
    pub dialect: ProofDialect,
    /// Declared cost parameters. Verification is parameter-self-describing:
    /// the document states what cost it claims to have paid.
    pub params: EquihashParams,
    /// Base64-encoded engine nonce.
    pub nonce: String,
    /// Base64-encoded big-endian-packed solution.
    pub value: String,
}

impl ProofAttachment {
    /// Render the attachment as the dialect's wire object.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!(self.dialect.type_tag()));
        obj.insert("equihashParameterN".to_string(), json!(self.params.n));
        obj.insert("equihashParameterK".to_string(), json!(self.params.k));
        obj.insert("nonce".to_string(), json!(self.nonce));
        obj.insert(self.dialect.value_field().to_string(), json!(self.value));
        Value::Object(obj)
    }

    /// Parse a wire object as an attachment of the given dialect.
    ///
    /// # Errors
    ///
    /// [`ProofError::MalformedProof`] for any structural violation: wrong
    /// JSON type, missing or mistyped fields, an unexpected `type` tag, or
    /// parameters outside the `u32` range.
    pub fn from_value(raw: &Value, dialect: ProofDialect) -> Result<Self, ProofError> {
        let obj = raw
            .as_object()
            .ok_or_else(|| malformed("attachment is not an object"))?;

        let type_tag = require_str(obj, "type")?;
        if type_tag != dialect.type_tag() {
            return Err(malformed(format!(
                "unexpected proof type {type_tag:?}, expected {:?}",
                dialect.type_tag()
            )));
        }

        let n = require_u32(obj, "equihashParameterN")?;
        let k = require_u32(obj, "equihashParameterK")?;
        let nonce = require_str(obj, "nonce")?.to_string();
        let value = require_str(obj, dialect.value_field())?.to_string();

        Ok(Self {
            dialect,
            params: EquihashParams::new(n, k),
            nonce,
            value,
        })
    }
}

fn malformed(msg: impl Into<String>) -> ProofError {
    ProofError::MalformedProof(msg.into())
}

fn require_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str, ProofError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(malformed(format!("{field} must be a string"))),
        None => Err(malformed(format!("missing {field}"))),
    }
}

fn require_u32(obj: &Map<String, Value>, field: &str) -> Result<u32, ProofError> {
    let value = obj
        .get(field)
        .ok_or_else(|| malformed(format!("missing {field}")))?;
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| malformed(format!("{field} must be an unsigned 32-bit integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(dialect: ProofDialect) -> ProofAttachment {
        ProofAttachment {
            dialect,
            params: EquihashParams::new(64, 3),
            nonce: "bm9uY2U=".to_string(),
            value: "AQIDBA==".to_string(),
        }
    }

    #[test]
    fn proof_dialect_wire_fields() {
        let val = sample(ProofDialect::Proof2018).to_value();
        assert_eq!(val["type"], "EquihashProof2018");
        assert_eq!(val["equihashParameterN"], 64);
        assert_eq!(val["equihashParameterK"], 3);
        assert_eq!(val["nonce"], "bm9uY2U=");
        assert_eq!(val["proofValue"], "AQIDBA==");
        assert!(val.get("signatureValue").is_none());
    }

    #[test]
    fn signature_dialect_wire_fields() {
        let val = sample(ProofDialect::Signature2017).to_value();
        assert_eq!(val["type"], "EquihashProof2017");
        assert_eq!(val["signatureValue"], "AQIDBA==");
        assert!(val.get("proofValue").is_none());
    }

    #[test]
    fn wire_roundtrip_both_dialects() {
        for dialect in [ProofDialect::Proof2018, ProofDialect::Signature2017] {
            let attachment = sample(dialect);
            let parsed = ProofAttachment::from_value(&attachment.to_value(), dialect).unwrap();
            assert_eq!(parsed, attachment);
        }
    }

    #[test]
    fn missing_value_field_rejected() {
        let mut val = sample(ProofDialect::Proof2018).to_value();
        val.as_object_mut().unwrap().remove("proofValue");
        let err = ProofAttachment::from_value(&val, ProofDialect::Proof2018).unwrap_err();
        match err {
            ProofError::MalformedProof(msg) => assert!(msg.contains("proofValue")),
            other => panic!("expected MalformedProof, got {other}"),
        }
    }

    #[test]
    fn non_string_value_field_rejected() {
        let mut val = sample(ProofDialect::Proof2018).to_value();
        val["proofValue"] = json!(12345);
        let err = ProofAttachment::from_value(&val, ProofDialect::Proof2018).unwrap_err();
        assert!(matches!(err, ProofError::MalformedProof(_)));
    }

    #[test]
    fn wrong_type_tag_rejected() {
        let mut val = sample(ProofDialect::Proof2018).to_value();
        val["type"] = json!("Ed25519Signature2020");
        let err = ProofAttachment::from_value(&val, ProofDialect::Proof2018).unwrap_err();
        match err {
            ProofError::MalformedProof(msg) => assert!(msg.contains("unexpected proof type")),
            other => panic!("expected MalformedProof, got {other}"),
        }
    }

    #[test]
    fn cross_dialect_parse_rejected() {
        // A 2018 proof node is not a valid legacy signature node: both the
        // tag and the value field name differ.
        let val = sample(ProofDialect::Proof2018).to_value();
        assert!(ProofAttachment::from_value(&val, ProofDialect::Signature2017).is_err());
    }

    #[test]
    fn non_integer_parameter_rejected() {
        let mut val = sample(ProofDialect::Proof2018).to_value();
        val["equihashParameterN"] = json!("64");
        assert!(ProofAttachment::from_value(&val, ProofDialect::Proof2018).is_err());
    }

    #[test]
    fn out_of_range_parameter_rejected() {
        let mut val = sample(ProofDialect::Proof2018).to_value();
        val["equihashParameterK"] = json!(u64::from(u32::MAX) + 1);
        assert!(ProofAttachment::from_value(&val, ProofDialect::Proof2018).is_err());
    }

    #[test]
    fn non_object_attachment_rejected() {
        let err =
            ProofAttachment::from_value(&json!("not an object"), ProofDialect::Proof2018)
                .unwrap_err();
        assert!(matches!(err, ProofError::MalformedProof(_)));
    }
}
