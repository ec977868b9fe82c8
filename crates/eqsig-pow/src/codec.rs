//! # Solution and Nonce Wire Codec
//!
//! Converts between the engine's native solution representation (an ordered
//! `u32` sequence) and the portable text encoding embedded in documents.
//!
//! ## Wire Layout
//!
//! Each 32-bit index is packed big-endian, concatenated with no padding or
//! separators (`len = 4 × |solution|`), then base64-encoded with the
//! standard alphabet. This packed layout — not any in-memory form — is the
//! wire format; it must be reproduced bit-exactly or cross-implementation
//! verification breaks silently, because a decoder that accepts the wrong
//! byte order still decodes *something*, just the wrong solution.
//!
//! The nonce uses a plain byte-preserving base64 encoding, applied
//! symmetrically.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

/// Error decoding a wire-encoded solution or nonce.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The decoded solution byte length is not a multiple of 4, so it
    /// cannot be a packed `u32` sequence. Never silently truncated.
    #[error("solution byte length {0} is not a multiple of 4")]
    UnalignedSolution(usize),

    /// The text is not valid base64.
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Pack a solution into its big-endian wire bytes.
pub fn pack_solution(solution: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(solution.len() * 4);
    for index in solution {
        bytes.extend_from_slice(&index.to_be_bytes());
    }
    bytes
}

/// Read a packed big-endian byte sequence back into solution indices.
///
/// Each value is an unconstrained 32-bit read; range validation beyond the
/// type is the verifier's job.
pub fn unpack_solution(bytes: &[u8]) -> Result<Vec<u32>, CodecError> {
    if bytes.len() % 4 != 0 {
        return Err(CodecError::UnalignedSolution(bytes.len()));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Encode a solution for embedding in a document.
pub fn encode_solution(solution: &[u32]) -> String {
    BASE64.encode(pack_solution(solution))
}

/// Decode a document-embedded solution back into ordered indices.
pub fn decode_solution(encoded: &str) -> Result<Vec<u32>, CodecError> {
    unpack_solution(&BASE64.decode(encoded)?)
}

/// Encode a nonce for embedding in a document.
pub fn encode_nonce(nonce: &[u8]) -> String {
    BASE64.encode(nonce)
}

/// Decode a document-embedded nonce.
pub fn decode_nonce(encoded: &str) -> Result<Vec<u8>, CodecError> {
    Ok(BASE64.decode(encoded)?)
}
