//! # Mock Equihash Engine
//!
//! A deterministic, transparent engine for development and testing.
//! Produces SHA-256-derived "solutions" that are cheap to recompute and
//! therefore provide **no proof-of-work guarantees**.
//!
//! ## How It Works
//!
//! - `solve()` derives a 32-byte nonce from the seed and parameters, then
//!   derives each of the `2^k` solution words as the leading 4 bytes of
//!   `SHA256(domain-tag || seed || nonce || index)`.
//! - `verify()` recomputes the same words from the presented seed, nonce,
//!   and parameters and compares; any length mismatch (including an empty
//!   solution) is a clean `false`.
//!
//! ## Security Warning
//!
//! **NOT MEMORY-HARD.** Anyone can produce a valid mock solution in
//! microseconds, so this engine gates nothing. It exists so the pipeline,
//! codec, and suite layers can be exercised deterministically; production
//! deployments inject a real Equihash backend instead.

use sha2::{Digest, Sha256};

use eqsig_core::Seed;

use crate::cancel::CancelToken;
use crate::engine::{EquihashEngine, PowSolution, SolveError, VerifyError};
use crate::params::EquihashParams;

const NONCE_TAG: &[u8] = b"eqsig.mock.nonce";
const WORD_TAG: &[u8] = b"eqsig.mock.word";

/// Deterministic development engine.
///
/// Stateless; a single instance serves concurrent solve and verify calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockEquihash;

/// Parameter constraints this engine accepts.
///
/// Mirrors the divisibility requirement of the reference Equihash solver:
/// the collision bit width `n / (k+1)` must be integral. The depth cap
/// keeps `2^k` solution material within reason for a test engine.
fn check_params(params: EquihashParams) -> Result<(), String> {
    if params.n == 0 || params.k == 0 {
        return Err("n and k must be positive".to_string());
    }
    if params.k > 24 {
        return Err("k must be at most 24".to_string());
    }
    if params.n % (params.k + 1) != 0 {
        return Err(format!("n must be divisible by k+1 ({})", params.k + 1));
    }
    Ok(())
}

fn derive_nonce(seed: &Seed, params: EquihashParams) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(NONCE_TAG);
    hasher.update(seed.as_bytes());
    hasher.update(params.n.to_be_bytes());
    hasher.update(params.k.to_be_bytes());
    hasher.finalize().to_vec()
}

// Parameters are mixed into every word, mirroring how real Equihash
// personalizes its hash with (n, k): a solution must not verify under
// parameters other than the ones it was solved for.
fn derive_word(seed: &Seed, params: EquihashParams, nonce: &[u8], index: u32) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(WORD_TAG);
    hasher.update(seed.as_bytes());
    hasher.update(params.n.to_be_bytes());
    hasher.update(params.k.to_be_bytes());
    hasher.update(nonce);
    hasher.update(index.to_be_bytes());
    let digest = hasher.finalize();
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

impl EquihashEngine for MockEquihash {
    fn solve(
        &self,
        seed: &Seed,
        params: EquihashParams,
        cancel: &CancelToken,
    ) -> Result<PowSolution, SolveError> {
        check_params(params).map_err(|reason| SolveError::UnsupportedParameters {
            params,
            reason,
        })?;

        let nonce = derive_nonce(seed, params);
        let mut solution = Vec::with_capacity(params.solution_len());
        for index in 0..params.solution_len() as u32 {
            if cancel.is_cancelled() {
                return Err(SolveError::Cancelled);
            }
            solution.push(derive_word(seed, params, &nonce, index));
        }

        Ok(PowSolution { nonce, solution })
    }

    fn verify(
        &self,
        seed: &Seed,
        params: EquihashParams,
        nonce: &[u8],
        solution: &[u32],
    ) -> Result<bool, VerifyError> {
        check_params(params).map_err(|reason| VerifyError::UnsupportedParameters {
            params,
            reason,
        })?;

        // Wrong length is a clean negative, not an engine fault. This is
        // also what rejects the zero-length solution.
        if solution.len() != params.solution_len() {
            return Ok(false);
        }

        let valid = solution
            .iter()
            .enumerate()
            .all(|(i, word)| *word == derive_word(seed, params, nonce, i as u32));
        Ok(valid)
    }
}
