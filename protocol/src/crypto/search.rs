//! # Bounded Discrete-Log Search
//!
//! Recovers `m` from `target = base·m` when `m` is known to lie in
//! `[0, bound)`. This is not a general discrete-log solver: it only works
//! because amounts are small, and the bound is part of the protocol.
//!
//! ## Algorithm
//!
//! Baby-step/giant-step with step `k = ⌈√bound⌉`:
//!
//! - baby steps: `base·j` for `j ∈ [0, k)`, indexed by compressed encoding;
//! - giant steps: `target − base·(i·k)` for `i = 0, 1, ...` until a baby step
//!   matches or `i·k` passes the bound.
//!
//! For the value domain (`2^18`) that is 512 table entries and at most 512
//! giant steps, versus up to 262,144 scalar multiplications for a linear
//! scan. Both loops are counted; the search always terminates.
//!
//! A [`DecryptionTable`] keeps the baby steps around so a key holder can
//! decrypt many ciphertexts under one key without rebuilding them.

use std::collections::HashMap;

use tracing::trace;

use crate::config::POINT_ENCODED_LEN;
use crate::curve::{EcPoint, Scalar};
use crate::error::{CryptoError, Result};

/// Precomputed baby steps for one base and one bound.
#[derive(Debug, Clone)]
pub struct DecryptionTable {
    base: EcPoint,
    bound: u64,
    step: u64,
    baby_steps: HashMap<[u8; POINT_ENCODED_LEN], u64>,
    /// `−base·step`.
    giant_stride: EcPoint,
}

impl DecryptionTable {
    /// Build the baby-step table for `base` over `[0, bound)`.
    pub fn new(base: &EcPoint, bound: u64) -> Self {
        let step = ceil_sqrt(bound).max(1);
        let mut baby_steps = HashMap::with_capacity(step as usize);
        let mut acc = EcPoint::identity();
        for j in 0..step {
            // Keep the smallest exponent if two steps ever collide.
            baby_steps.entry(acc.to_bytes()).or_insert(j);
            acc = acc + *base;
        }
        let giant_stride = base.scalar_mul(&Scalar::from(step)).negate();
        trace!(bound, step, "built baby-step table");
        Self {
            base: *base,
            bound,
            step,
            baby_steps,
            giant_stride,
        }
    }

    pub fn base(&self) -> &EcPoint {
        &self.base
    }

    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Find `m ∈ [0, bound)` with `base·m == target`.
    ///
    /// # Errors
    ///
    /// `OutOfRange { bound }` if no such `m` exists.
    pub fn solve(&self, target: &EcPoint) -> Result<u64> {
        let mut gamma = *target;
        let giant_steps = self.bound.div_ceil(self.step);
        for i in 0..giant_steps {
            if let Some(j) = self.baby_steps.get(&gamma.to_bytes()) {
                let m = i * self.step + j;
                if m < self.bound {
                    trace!(giant_step = i, "bounded search hit");
                    return Ok(m);
                }
                // Past the bound: later giant steps only go higher.
                break;
            }
            gamma = gamma + self.giant_stride;
        }
        Err(CryptoError::OutOfRange { bound: self.bound })
    }
}

/// One-shot form of [`DecryptionTable::solve`].
pub fn bounded_discrete_log(base: &EcPoint, target: &EcPoint, bound: u64) -> Result<u64> {
    DecryptionTable::new(base, bound).solve(target)
}

/// Smallest `k` with `k·k >= n`.
fn ceil_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut k = (n as f64).sqrt() as u64;
    // Float sqrt can be off by one either way for large n.
    while k.saturating_mul(k) < n {
        k += 1;
    }
    while k > 0 && (k - 1).saturating_mul(k - 1) >= n {
        k -= 1;
    }
    k
}
