//! # Equihash Cost Parameters
//!
//! The `(n, k)` pair that fixes the memory/time tradeoff of the
//! generalized-birthday collision search.

use serde::{Deserialize, Serialize};

/// Equihash cost parameters.
///
/// `n` is the hash output bit width, `k` the collision tree depth. Together
/// they determine solver memory (≈ `2^(n/(k+1))` entries) and the solution
/// shape (`2^k` indices). Which `(n, k)` combinations are actually solvable
/// is an engine property — the pipeline forwards them unchecked and lets
/// the engine report incompatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquihashParams {
    /// Hash output bit width.
    pub n: u32,
    /// Collision tree depth.
    pub k: u32,
}

impl EquihashParams {
    /// Create a parameter pair.
    pub fn new(n: u32, k: u32) -> Self {
        Self { n, k }
    }

    /// Number of 32-bit indices in a solution for these parameters: `2^k`.
    pub fn solution_len(&self) -> usize {
        1usize << self.k
    }
}

impl std::fmt::Display for EquihashParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n={},k={}", self.n, self.k)
    }
}
