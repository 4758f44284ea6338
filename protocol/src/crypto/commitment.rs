//! # Pedersen Commitments
//!
//! A commitment to value `v` with randomness `r` under a public key is:
//!
//! ```text
//! C = v·G1 + r·H
//! ```
//!
//! Hiding comes from `r`; binding from the unknown discrete-log relation
//! between `G1` and `H`. The randomness is kept next to the point because
//! an opener needs it. A verifier that only checks equality proofs never
//! sees it.
//!
//! ## Opening by search
//!
//! There is no trapdoor here. [`open_commitment`] recovers `v` by searching
//! `[0, COMMITMENT_SEARCH_BOUND)` for the value whose commitment under the
//! disclosed `r` matches. That only makes sense because token amounts are
//! small; a value above the bound is reported as `OutOfRange`, never as a
//! wrong answer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::keys::PublicKey;
use super::search::bounded_discrete_log;
use crate::config::{COMMITMENT_SEARCH_BOUND, POINT_ENCODED_LEN, SCALAR_ENCODED_LEN};
use crate::curve::{
    scalar::serde_scalar, scalar_from_be_bytes, scalar_from_canonical_bytes, scalar_to_bytes,
    EcPoint, Scalar,
};
use crate::error::{CryptoError, Result};

/// Wire size of a commitment together with its opening randomness.
pub const COMMITMENT_LEN: usize = POINT_ENCODED_LEN + SCALAR_ENCODED_LEN;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A Pedersen commitment point and the randomness that opens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// `C = v·G1 + r·H`.
    pub point: EcPoint,
    /// `r`, exactly as supplied to [`commit`].
    #[serde(with = "serde_scalar")]
    pub randomness: Scalar,
}

impl Commitment {
    /// `C || r`.
    pub fn to_bytes(&self) -> [u8; COMMITMENT_LEN] {
        let mut out = [0u8; COMMITMENT_LEN];
        out[..POINT_ENCODED_LEN].copy_from_slice(&self.point.to_bytes());
        out[POINT_ENCODED_LEN..].copy_from_slice(&scalar_to_bytes(&self.randomness));
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMMITMENT_LEN {
            return Err(CryptoError::MalformedEncoding(format!(
                "commitment must be {} bytes, got {}",
                COMMITMENT_LEN,
                bytes.len()
            )));
        }
        Ok(Self {
            point: EcPoint::from_bytes(&bytes[..POINT_ENCODED_LEN])?,
            randomness: scalar_from_canonical_bytes(&bytes[POINT_ENCODED_LEN..])?,
        })
    }
}

// ---------------------------------------------------------------------------
// Commit / Open
// ---------------------------------------------------------------------------

/// `v·G1 + r·H`.
///
/// `r` is already a field element, so the returned randomness is `r`
/// itself. Callers holding randomness as raw bytes should go through
/// [`commit_with_raw_randomness`], which refuses values at or above the
/// group order instead of reducing them.
pub fn commit(public: &PublicKey, v: &Scalar, r: &Scalar) -> Commitment {
    Commitment {
        point: public.g1.scalar_mul(v) + public.h.scalar_mul(r),
        randomness: *r,
    }
}

/// Commit to a byte string read as a big-endian integer (reduced modulo the
/// group order).
pub fn commit_bytes(public: &PublicKey, value: &[u8], r: &Scalar) -> Commitment {
    commit(public, &scalar_from_be_bytes(value), r)
}

pub fn commit_u64(public: &PublicKey, v: u64, r: &Scalar) -> Commitment {
    commit(public, &Scalar::from(v), r)
}

/// Commit with big-endian randomness bytes of at most 32 bytes.
///
/// Shorter inputs are left-padded. The stored randomness re-encodes to the
/// same integer the caller supplied.
///
/// # Errors
///
/// `InvalidScalar` if `r` is longer than 32 bytes or encodes a value not
/// below the group order.
pub fn commit_with_raw_randomness(
    public: &PublicKey,
    v: &Scalar,
    r: &[u8],
) -> Result<Commitment> {
    if r.len() > SCALAR_ENCODED_LEN {
        return Err(CryptoError::InvalidScalar(format!(
            "randomness must be at most {} bytes, got {}",
            SCALAR_ENCODED_LEN,
            r.len()
        )));
    }
    let mut padded = [0u8; SCALAR_ENCODED_LEN];
    padded[SCALAR_ENCODED_LEN - r.len()..].copy_from_slice(r);
    let r = scalar_from_canonical_bytes(&padded)?;
    Ok(commit(public, v, &r))
}

/// Recover the committed value by bounded search.
///
/// # Errors
///
/// `OutOfRange { bound: COMMITMENT_SEARCH_BOUND }` if no value below the
/// bound opens the commitment with its randomness.
pub fn open_commitment(public: &PublicKey, commitment: &Commitment) -> Result<u64> {
    let target = commitment.point - public.h.scalar_mul(&commitment.randomness);
    bounded_discrete_log(&public.g1, &target, COMMITMENT_SEARCH_BOUND)
}

/// Whether the commitment opens to some value below the search bound.
pub fn verify_commitment(public: &PublicKey, commitment: &Commitment) -> bool {
    match open_commitment(public, commitment) {
        Ok(_) => true,
        Err(reason) => {
            debug!(%reason, "commitment did not open");
            false
        }
    }
}
