//! Format proof: a ciphertext encrypts a stated public value.
//!
//! For `CT = (P1, P2)` under `pub` with randomness `r` and value `v`:
//!
//! ```text
//! P1 − v·G1 = r·H
//! P2        = r·G2
//! ```
//!
//! That is an equality proof over bases `(H, G2)` with witness `r`. The
//! verifier derives both statements itself from `(pub, v, CT)` and refuses
//! a proof that claims anything else.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::crypto::encryption::CypherText;
use crate::crypto::keys::PublicKey;
use crate::curve::{EcPoint, Scalar};
use crate::error::{Result, VerificationError};
use crate::sigma::{reject, EqualityProof};

const KIND: &str = "format";

/// Equality proof specialised to the ciphertext-format relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatProof(EqualityProof);

impl FormatProof {
    pub fn as_equality(&self) -> &EqualityProof {
        &self.0
    }

    /// Check the proof for `(public, v, ct)`.
    pub fn verify(&self, public: &PublicKey, v: u64, ct: &CypherText) -> Result<()> {
        let (bases, statements) = format_relation(public, v, ct);
        if self.0.bases != bases || self.0.statements != statements {
            return Err(reject(KIND, VerificationError::StatementMismatch));
        }
        self.0.verify()
    }

    /// Same layout as [`EqualityProof::to_bytes`], response negated.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        EqualityProof::from_bytes(bytes).map(Self)
    }
}

/// Bases `(H, G2)` and statements `(P1 − v·G1, P2)`.
fn format_relation(public: &PublicKey, v: u64, ct: &CypherText) -> ([EcPoint; 2], [EcPoint; 2]) {
    (
        [public.h, public.g2],
        [ct.p1 - public.g1.scalar_mul(&Scalar::from(v)), ct.p2],
    )
}

/// Prove that `ct` encrypts `v` under `public` with randomness `r`.
///
/// A proof built from a ciphertext that does not actually match `(v, r)` is
/// still returned, and is rejected by the verifier.
pub fn prove_format<R: RngCore + CryptoRng>(
    public: &PublicKey,
    v: u64,
    r: &Scalar,
    ct: &CypherText,
    rng: &mut R,
) -> Result<FormatProof> {
    let (bases, statements) = format_relation(public, v, ct);
    EqualityProof::prove_statements(bases, statements, r, rng).map(FormatProof)
}

/// Boolean entry point for transaction validators.
pub fn verify_format_proof(
    public: &PublicKey,
    v: u64,
    ct: &CypherText,
    proof: &FormatProof,
) -> bool {
    proof.verify(public, v, ct).is_ok()
}
