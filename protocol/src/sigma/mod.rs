//! # Sigma-Protocol Engine
//!
//! Non-interactive Schnorr-style proofs of knowledge over [`EcPoint`]s, made
//! non-interactive with the Fiat-Shamir transform in [`transcript`].
//!
//! ## Architecture
//!
//! ```text
//! transcript.rs      challenge = SHA-256(decimal coords: bases, statements, announcements)
//! dlog.rs            DlogProof: Y = G·x
//! representation.rs  RepresentationProof: Y = Σ G_i·x_i
//! equality.rs        EqualityProof: Y1 = G1·x and Y2 = G2·x, one x
//! linear.rs          LinearProof: Y = Σ G_i·x_i and Σ a_i·x_i = b
//! wire.rs            fixed byte layouts shared by all proof types
//! ```
//!
//! Every proof shares one shape: statement point(s) `Y`, announcement
//! point(s) `T`, a 32-byte challenge `C` and response scalar(s)
//! `s = v − C·x mod r`. Verification rebuilds `T` from the responses as
//! `Y·C + Σ G_i·s_i` and compares. The helpers below hold that shared
//! arithmetic so each proof type only describes its bases and witnesses.
//!
//! Proofs are immutable values. Provers draw randomness from a caller-owned
//! CSPRNG; verifiers never touch randomness.

pub mod dlog;
pub mod equality;
pub mod linear;
pub mod representation;
pub mod transcript;
pub(crate) mod wire;

pub use dlog::DlogProof;
pub use equality::EqualityProof;
pub use linear::LinearProof;
pub use representation::RepresentationProof;
pub use transcript::{compute_challenge, Challenge};

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MAX_VECTOR_LEN;
use crate::curve::{random_scalar, EcPoint, Scalar};
use crate::error::{CryptoError, Result, VerificationError};

// ---------------------------------------------------------------------------
// ResponseEncoding
// ---------------------------------------------------------------------------

/// How response scalars are written on the wire.
///
/// Some deployed proof formats transmit `−s mod r` instead of `s`. The value
/// held in memory is always the true response; the flip is applied exactly
/// once when encoding and undone exactly once when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseEncoding {
    /// Responses are transmitted as computed.
    Plain,
    /// Responses are transmitted negated modulo the group order.
    Negated,
}

impl ResponseEncoding {
    /// In-memory response → wire value.
    pub fn encode(self, s: &Scalar) -> Scalar {
        match self {
            Self::Plain => *s,
            Self::Negated => -*s,
        }
    }

    /// Wire value → in-memory response.
    pub fn decode(self, s: &Scalar) -> Scalar {
        // Negation is an involution, so both directions are the same map.
        self.encode(s)
    }
}

// ---------------------------------------------------------------------------
// Shared arithmetic
// ---------------------------------------------------------------------------

/// `s = v − c·x mod r`.
pub(crate) fn respond(blinding: &Scalar, challenge: &Scalar, witness: &Scalar) -> Scalar {
    *blinding - *challenge * witness
}

/// `Y·c + Σ G_i·s_i`, the announcement an honest prover must have sent.
pub(crate) fn expected_announcement(
    bases: &[EcPoint],
    responses: &[Scalar],
    statement: &EcPoint,
    challenge: &Scalar,
) -> EcPoint {
    statement.scalar_mul(challenge) + EcPoint::linear_combination(bases, responses)
}

/// One uniformly random blinding scalar per base.
pub(crate) fn random_blindings<R: RngCore + CryptoRng>(
    n: usize,
    rng: &mut R,
) -> Result<Vec<Scalar>> {
    (0..n).map(|_| random_scalar(rng)).collect()
}

/// Arity check used by every n-ary prover and verifier.
pub(crate) fn check_arity(expected: usize, actual: usize) -> Result<()> {
    if expected == 0 {
        return Err(CryptoError::EmptyStatement);
    }
    if expected > MAX_VECTOR_LEN {
        return Err(CryptoError::ArityMismatch {
            expected: MAX_VECTOR_LEN,
            actual: expected,
        });
    }
    if expected != actual {
        return Err(CryptoError::ArityMismatch { expected, actual });
    }
    Ok(())
}

/// Log and return a verification failure.
pub(crate) fn reject(kind: &'static str, reason: VerificationError) -> CryptoError {
    debug!(proof = kind, %reason, "proof rejected");
    CryptoError::Verification(reason)
}
