//! # Canonical Byte Production
//!
//! This module defines [`CanonicalBytes`], the sole construction path for the
//! bytes a proof-of-work seed is computed over, and the [`Canonicalizer`]
//! seam through which the proof pipeline consumes canonicalization.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through [`CanonicalBytes::new()`] / [`CanonicalBytes::from_value()`],
//! which reject floats and serialize via RFC 8785 (JSON Canonicalization
//! Scheme). Any function that binds a seed must accept `&CanonicalBytes`,
//! so a seed can never be computed over non-canonical bytes.
//!
//! ## Interoperability
//!
//! A proof is only transferable between implementations if both produce
//! byte-identical canonical output for the same document. JCS gives sorted
//! keys, compact separators, and a deterministic UTF-8 byte sequence;
//! the float rejection closes the one number-formatting edge case where
//! independent serializers can still disagree.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization with float rejection.
///
/// # Invariants
///
/// - The only constructors are [`CanonicalBytes::new()`] and
///   [`CanonicalBytes::from_value()`].
/// - All numbers are integers; floats are rejected at construction.
/// - Serialization uses sorted keys with compact separators (RFC 8785).
///
/// These invariants cannot be violated by downstream code because the inner
/// `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::FloatRejected`] if the value contains
    /// a non-integer number, or [`CanonicalizationError::SerializationFailed`]
    /// if JCS serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        Self::from_value(serde_json::to_value(obj)?)
    }

    /// Construct canonical bytes from an already-built JSON value.
    pub fn from_value(value: Value) -> Result<Self, CanonicalizationError> {
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for seed binding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively reject non-integer numbers anywhere in the value tree.
///
/// `null`, `bool`, `string`, and integer numbers pass through; objects and
/// arrays are recursed. A number that is representable as neither `i64` nor
/// `u64` is a float and fails construction.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Object(map) => {
            for v in map.values() {
                reject_floats(v)?;
            }
            Ok(())
        }
        Value::Array(arr) => {
            for v in arr {
                reject_floats(v)?;
            }
            Ok(())
        }
    }
}

/// Deterministic document-to-bytes transformation.
///
/// This is the canonicalization collaborator boundary: the proof pipeline
/// consumes canonicalization through this trait and never assumes a specific
/// algorithm. Implementations MUST be deterministic — identical documents
/// always yield byte-identical output, independent of input key ordering.
///
/// [`JcsCanonicalizer`] is the shipped implementation. A caller integrating
/// with an RDF graph-normalization stack (URDNA2015 over n-quads) supplies
/// its own impl; the pipeline is indifferent as long as signer and verifier
/// agree on the algorithm.
pub trait Canonicalizer: Send + Sync {
    /// Transform a document into its canonical byte sequence.
    fn normalize(&self, document: &Value) -> Result<CanonicalBytes, CanonicalizationError>;
}

/// RFC 8785 (JCS) canonicalizer with float rejection.
///
/// Stateless; one instance may serve arbitrarily many concurrent calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct JcsCanonicalizer;

impl Canonicalizer for JcsCanonicalizer {
    fn normalize(&self, document: &Value) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::from_value(document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_object_sorted_compact() {
        let data = serde_json::json!({"b": 2, "a": 1, "c": "hello"});
        let cb = CanonicalBytes::new(&data).expect("should canonicalize");
        assert_eq!(cb.as_bytes(), br#"{"a":1,"b":2,"c":"hello"}"#);
    }

    #[test]
    fn keys_sorted_regardless_of_insertion_order() {
        let data = serde_json::json!({"z": 1, "m": 2, "a": 3});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"a":3,"m":2,"z":1}"#);
    }

    #[test]
    fn nested_objects_sorted() {
        let data = serde_json::json!({
            "outer": {"b": 2, "a": 1},
            "list": [3, 2, 1]
        });
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"list":[3,2,1],"outer":{"a":1,"b":2}}"#);
    }

    #[test]
    fn float_rejected() {
        let data = serde_json::json!({"amount": 1.5});
        match CanonicalBytes::new(&data) {
            Err(CanonicalizationError::FloatRejected(f)) => assert_eq!(f, 1.5),
            other => panic!("expected FloatRejected, got {other:?}"),
        }
    }

    #[test]
    fn deeply_nested_float_rejected() {
        let data = serde_json::json!({"a": {"b": [{"c": 3.14}]}});
        assert!(CanonicalBytes::new(&data).is_err());
    }

    #[test]
    fn integers_pass_through() {
        let data = serde_json::json!({"n": 64, "k": 3, "neg": -42});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"k":3,"n":64,"neg":-42}"#);
    }

    #[test]
    fn null_and_bool_pass_through() {
        let data = serde_json::json!({"flag": true, "gone": null});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"flag":true,"gone":null}"#);
    }

    #[test]
    fn empty_object() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(cb.as_bytes(), b"{}");
        assert!(!cb.is_empty());
        assert_eq!(cb.len(), 2);
    }

    #[test]
    fn unicode_passes_through_as_utf8() {
        let data = serde_json::json!({"name": "\u{00e9}t\u{00e9}"});
        let cb = CanonicalBytes::new(&data).unwrap();
        let s = std::str::from_utf8(cb.as_bytes()).unwrap();
        assert!(s.contains('\u{00e9}'));
    }

    #[test]
    fn jcs_canonicalizer_matches_direct_construction() {
        let doc = serde_json::json!({"id": "foo:something"});
        let via_trait = JcsCanonicalizer.normalize(&doc).unwrap();
        let direct = CanonicalBytes::from_value(doc).unwrap();
        assert_eq!(via_trait, direct);
    }
}
