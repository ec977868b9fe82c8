//! # Seed Binding
//!
//! Binds canonical document bytes to the fixed-length challenge the
//! proof-of-work engine solves against.
//!
//! ## Security Invariant
//!
//! [`Seed::bind()`] accepts only `&CanonicalBytes`, not raw `&[u8]`. The
//! compile-time constraint guarantees every seed in the system was computed
//! over properly canonicalized bytes, which is the binding that makes a
//! proof non-transferable to a different document.

use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// The 32-byte proof-of-work challenge derived from a document.
///
/// Derived, never stored: verifiers always recompute the seed from the
/// document (with the proof attachment stripped). Two documents with
/// identical canonical bytes produce identical seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; 32]);

impl Seed {
    /// Compute the SHA-256 seed over the exact canonical byte string.
    ///
    /// Total over all inputs; a digest has no failure mode.
    pub fn bind(canonical: &CanonicalBytes) -> Self {
        let hash = Sha256::digest(canonical.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// The raw 32-byte seed value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the seed as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_is_deterministic() {
        let cb = CanonicalBytes::new(&serde_json::json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(Seed::bind(&cb), Seed::bind(&cb));
    }

    #[test]
    fn different_documents_different_seeds() {
        let c1 = CanonicalBytes::new(&serde_json::json!({"x": 1})).unwrap();
        let c2 = CanonicalBytes::new(&serde_json::json!({"x": 2})).unwrap();
        assert_ne!(Seed::bind(&c1), Seed::bind(&c2));
    }

    #[test]
    fn known_sha256_vector() {
        // SHA-256 of the two bytes "{}", cross-checked against
        // `echo -n '{}' | sha256sum`.
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(cb.as_bytes(), b"{}");
        assert_eq!(
            Seed::bind(&cb).to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn display_matches_hex() {
        let cb = CanonicalBytes::new(&serde_json::json!({"id": "foo:something"})).unwrap();
        let seed = Seed::bind(&cb);
        let shown = format!("{seed}");
        assert_eq!(shown, seed.to_hex());
        assert_eq!(shown.len(), 64);
        assert!(shown.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn key_order_does_not_change_seed() {
        let a = CanonicalBytes::new(&serde_json::json!({"p": 1, "q": 2})).unwrap();
        let b = CanonicalBytes::new(&serde_json::json!({"q": 2, "p": 1})).unwrap();
        assert_eq!(Seed::bind(&a), Seed::bind(&b));
    }
}
