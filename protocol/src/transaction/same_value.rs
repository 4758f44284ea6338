//! Same-value proof: two commitments under two different keys hide the
//! same amount (or address).
//!
//! With `C1 = v·G1a + r1·H1` under key `a` and `C2 = v·G1b + r2·H2` under
//! key `b`, the prover shows one `v` opens
//!
//! ```text
//! C1 − r1·H1 = v·G1a
//! C2 − r2·H2 = v·G1b
//! ```
//!
//! as an equality proof over bases `(G1a, G1b)`. The exchange uses this to
//! show a regulator that the amount it encrypted for the regulator is the
//! amount it encrypted for the recipient.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::crypto::commitment::Commitment;
use crate::crypto::encryption::address_to_value;
use crate::crypto::keys::PublicKey;
use crate::curve::{EcPoint, Scalar};
use crate::error::{Result, VerificationError};
use crate::sigma::{reject, EqualityProof};

const KIND: &str = "same-value";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SameValueProof(EqualityProof);

/// `C − r·H`, the value part of an opened commitment.
fn unblind(public: &PublicKey, commitment: &Commitment) -> EcPoint {
    commitment.point - public.h.scalar_mul(&commitment.randomness)
}

impl SameValueProof {
    pub fn as_equality(&self) -> &EqualityProof {
        &self.0
    }

    /// Check the proof is over the two keys' value bases and is valid.
    ///
    /// This does not tie the proof to particular commitments; use
    /// [`verify_same_value`] when the openings are at hand.
    pub fn verify(&self, first: &PublicKey, second: &PublicKey) -> Result<()> {
        if self.0.bases != [first.g1, second.g1] {
            return Err(reject(KIND, VerificationError::StatementMismatch));
        }
        self.0.verify()
    }

    /// Check the proof against two opened commitments.
    pub fn verify_commitments(
        &self,
        first: (&PublicKey, &Commitment),
        second: (&PublicKey, &Commitment),
    ) -> Result<()> {
        let expected = [unblind(first.0, first.1), unblind(second.0, second.1)];
        if self.0.statements != expected {
            return Err(reject(KIND, VerificationError::StatementMismatch));
        }
        self.verify(first.0, second.0)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        EqualityProof::from_bytes(bytes).map(Self)
    }
}

/// Prove that `first` and `second` both commit to `v`.
pub fn prove_same_value<R: RngCore + CryptoRng>(
    first: (&PublicKey, &Commitment),
    second: (&PublicKey, &Commitment),
    v: u64,
    rng: &mut R,
) -> Result<SameValueProof> {
    let bases = [first.0.g1, second.0.g1];
    let statements = [unblind(first.0, first.1), unblind(second.0, second.1)];
    EqualityProof::prove_statements(bases, statements, &Scalar::from(v), rng).map(SameValueProof)
}

/// [`prove_same_value`] for an address, read through the address adapter.
pub fn prove_same_address<R: RngCore + CryptoRng>(
    first: (&PublicKey, &Commitment),
    second: (&PublicKey, &Commitment),
    address: &[u8],
    rng: &mut R,
) -> Result<SameValueProof> {
    prove_same_value(first, second, address_to_value(address)?, rng)
}

/// Boolean entry point: the proof is valid for these opened commitments.
pub fn verify_same_value(
    first: (&PublicKey, &Commitment),
    second: (&PublicKey, &Commitment),
    proof: &SameValueProof,
) -> bool {
    proof.verify_commitments(first, second).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::encryption::{encrypt_address, encrypt_value};
    use crate::crypto::keys::generate_keys;
    use crate::curve::CurveContext;
    use crate::error::CryptoError;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    fn two_keys(rng: &mut StdRng) -> (PublicKey, PublicKey) {
        let ctx = CurveContext::bn254();
        let (a, _) = generate_keys(&ctx, "exchange", rng).unwrap();
        let (b, _) = generate_keys(&ctx, "regulator", rng).unwrap();
        (a, b)
    }

    #[test]
    fn same_amount_under_two_keys_verifies() {
        let mut rng = StdRng::seed_from_u64(42);
        let (a, b) = two_keys(&mut rng);
        let (_, c1, _) = encrypt_value(&a, 250, &mut rng).unwrap();
        let (_, c2, _) = encrypt_value(&b, 250, &mut rng).unwrap();

        let proof = prove_same_value((&a, &c1), (&b, &c2), 250, &mut rng).unwrap();
        assert!(verify_same_value((&a, &c1), (&b, &c2), &proof));
        assert!(proof.verify(&a, &b).is_ok());

        let back = SameValueProof::from_bytes(&proof.to_bytes()).unwrap();
        assert!(verify_same_value((&a, &c1), (&b, &c2), &back));
    }

    #[test]
    fn different_amounts_fail() {
        let mut rng = StdRng::seed_from_u64(43);
        let (a, b) = two_keys(&mut rng);
        let (_, c1, _) = encrypt_value(&a, 250, &mut rng).unwrap();
        let (_, c2, _) = encrypt_value(&b, 251, &mut rng).unwrap();
        let proof = prove_same_value((&a, &c1), (&b, &c2), 250, &mut rng).unwrap();
        assert_eq!(
            proof.verify_commitments((&a, &c1), (&b, &c2)),
            Err(CryptoError::Verification(VerificationError::ResponseMismatch { index: 1 }))
        );
    }

    #[test]
    fn swapped_keys_are_a_statement_mismatch() {
        let mut rng = StdRng::seed_from_u64(44);
        let (a, b) = two_keys(&mut rng);
        let (_, c1, _) = encrypt_value(&a, 7, &mut rng).unwrap();
        let (_, c2, _) = encrypt_value(&b, 7, &mut rng).unwrap();
        let proof = prove_same_value((&a, &c1), (&b, &c2), 7, &mut rng).unwrap();
        assert_eq!(
            proof.verify(&b, &a),
            Err(CryptoError::Verification(VerificationError::StatementMismatch))
        );
    }

    #[test]
    fn same_address_proof() {
        let mut rng = StdRng::seed_from_u64(45);
        let (a, b) = two_keys(&mut rng);
        let address = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0, 0x11, 0x22];
        let (_, c1, _) = encrypt_address(&a, &address, &mut rng).unwrap();
        let (_, c2, _) = encrypt_address(&b, &address, &mut rng).unwrap();
        let proof = prove_same_address((&a, &c1), (&b, &c2), &address, &mut rng).unwrap();
        assert!(verify_same_value((&a, &c1), (&b, &c2), &proof));
        assert!(prove_same_address((&a, &c1), (&b, &c2), &address[..4], &mut rng).is_err());
    }
}
