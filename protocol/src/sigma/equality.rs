//! Two-base equality of discrete logs.
//!
//! Proves one witness `x` opens both `Y1 = G1·x` and `Y2 = G2·x`. A single
//! blinding `v` is shared across the two announcements, and a single
//! response answers both. This is the building block of the format proof
//! (ciphertext vs. commitment) and the same-value proof (two keys).
//!
//! On the wire the response is carried negated
//! ([`ResponseEncoding::Negated`]); the in-memory value and the JSON form
//! hold the true response.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use super::transcript::{compute_challenge, Challenge};
use super::wire::{WireReader, WireWriter};
use super::{expected_announcement, reject, respond, ResponseEncoding};
use crate::config::{CHALLENGE_LEN, POINT_ENCODED_LEN, SCALAR_ENCODED_LEN};
use crate::curve::{random_scalar, scalar::serde_scalar, EcPoint, Scalar};
use crate::error::{Result, VerificationError};

const KIND: &str = "equality";

/// Wire encoding applied to the response of every equality proof.
pub const EQUALITY_RESPONSE_ENCODING: ResponseEncoding = ResponseEncoding::Negated;

/// Wire size: `G1 || G2 || Y1 || Y2 || T1 || T2 || C || S`.
pub const EQUALITY_PROOF_LEN: usize = 6 * POINT_ENCODED_LEN + CHALLENGE_LEN + SCALAR_ENCODED_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualityProof {
    /// `[G1, G2]`.
    pub bases: [EcPoint; 2],
    /// `[Y1, Y2] = [G1·x, G2·x]`.
    pub statements: [EcPoint; 2],
    /// `[T1, T2] = [G1·v, G2·v]`.
    pub announcements: [EcPoint; 2],
    pub challenge: Challenge,
    #[serde(with = "serde_scalar")]
    pub response: Scalar,
}

impl EqualityProof {
    /// Prove that `x` is the discrete log of `G1·x` and of `G2·x`.
    pub fn prove<R: RngCore + CryptoRng>(
        g1: &EcPoint,
        g2: &EcPoint,
        x: &Scalar,
        rng: &mut R,
    ) -> Result<Self> {
        let statements = [g1.scalar_mul(x), g2.scalar_mul(x)];
        Self::prove_statements([*g1, *g2], statements, x, rng)
    }

    /// Prove with statement points the caller derived from public data
    /// (e.g. `P1 − v·G1` from a ciphertext). If `x` does not actually open
    /// them, the resulting proof fails verification.
    pub fn prove_statements<R: RngCore + CryptoRng>(
        bases: [EcPoint; 2],
        statements: [EcPoint; 2],
        x: &Scalar,
        rng: &mut R,
    ) -> Result<Self> {
        let [g1, g2] = bases;
        let v = random_scalar(rng)?;
        let announcements = [g1.scalar_mul(&v), g2.scalar_mul(&v)];

        let challenge = compute_challenge(&bases, &statements, &announcements);
        let response = respond(&v, &challenge.to_scalar(), x);

        Ok(Self {
            bases,
            statements,
            announcements,
            challenge,
            response,
        })
    }

    /// Check both relations; the first failing announcement is reported by
    /// index (0 for `T1`, 1 for `T2`).
    pub fn verify(&self) -> Result<()> {
        let recomputed = compute_challenge(&self.bases, &self.statements, &self.announcements);
        if recomputed != self.challenge {
            return Err(reject(KIND, VerificationError::ChallengeMismatch));
        }
        let c = self.challenge.to_scalar();
        for index in 0..2 {
            let t = expected_announcement(
                &self.bases[index..=index],
                &[self.response],
                &self.statements[index],
                &c,
            );
            if t != self.announcements[index] {
                return Err(reject(KIND, VerificationError::ResponseMismatch { index }));
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        WireWriter::with_capacity(EQUALITY_PROOF_LEN)
            .points(&self.bases)
            .points(&self.statements)
            .points(&self.announcements)
            .challenge(&self.challenge)
            .scalar(&EQUALITY_RESPONSE_ENCODING.encode(&self.response))
            .finish()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(bytes);
        let proof = Self {
            bases: [r.point()?, r.point()?],
            statements: [r.point()?, r.point()?],
            announcements: [r.point()?, r.point()?],
            challenge: r.challenge()?,
            response: EQUALITY_RESPONSE_ENCODING.decode(&r.scalar()?),
        };
        r.finish()?;
        Ok(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptoError;
    use ark_bn254::Fr;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    fn two_bases(rng: &mut StdRng) -> (EcPoint, EcPoint) {
        let g = EcPoint::generator();
        (
            g.scalar_mul(&random_scalar(rng).unwrap()),
            g.scalar_mul(&random_scalar(rng).unwrap()),
        )
    }

    #[test]
    fn honest_proof_verifies() {
        let mut rng = StdRng::seed_from_u64(42);
        let (g1, g2) = two_bases(&mut rng);
        let x = random_scalar(&mut rng).unwrap();
        let proof = EqualityProof::prove(&g1, &g2, &x, &mut rng).unwrap();
        assert!(proof.is_valid());
    }

    /// A prover holding different logs for the two statements cannot answer
    /// with one response: the second relation breaks.
    #[test]
    fn different_witnesses_fail() {
        let mut rng = StdRng::seed_from_u64(7);
        let (g1, g2) = two_bases(&mut rng);
        let x1 = random_scalar(&mut rng).unwrap();
        let x2 = x1 + Fr::from(1u64);
        let v = random_scalar(&mut rng).unwrap();

        let bases = [g1, g2];
        let statements = [g1.scalar_mul(&x1), g2.scalar_mul(&x2)];
        let announcements = [g1.scalar_mul(&v), g2.scalar_mul(&v)];
        let challenge = compute_challenge(&bases, &statements, &announcements);
        let forged = EqualityProof {
            bases,
            statements,
            announcements,
            challenge,
            response: respond(&v, &challenge.to_scalar(), &x1),
        };
        assert_eq!(
            forged.verify(),
            Err(CryptoError::Verification(VerificationError::ResponseMismatch { index: 1 }))
        );
    }

    #[test]
    fn tampered_statement_fails_challenge() {
        let mut rng = StdRng::seed_from_u64(8);
        let (g1, g2) = two_bases(&mut rng);
        let x = random_scalar(&mut rng).unwrap();
        let mut proof = EqualityProof::prove(&g1, &g2, &x, &mut rng).unwrap();
        proof.statements[0] = proof.statements[0] + g1;
        assert_eq!(
            proof.verify(),
            Err(CryptoError::Verification(VerificationError::ChallengeMismatch))
        );
    }

    #[test]
    fn wire_response_is_negated() {
        let mut rng = StdRng::seed_from_u64(9);
        let (g1, g2) = two_bases(&mut rng);
        let x = random_scalar(&mut rng).unwrap();
        let proof = EqualityProof::prove(&g1, &g2, &x, &mut rng).unwrap();

        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), EQUALITY_PROOF_LEN);
        let tail = &bytes[bytes.len() - SCALAR_ENCODED_LEN..];
        let wire_s = crate::curve::scalar_from_canonical_bytes(tail).unwrap();
        assert_eq!(wire_s, -proof.response);

        let back = EqualityProof::from_bytes(&bytes).unwrap();
        assert_eq!(back, proof);
        assert!(back.is_valid());
    }

    #[test]
    fn json_round_trip_keeps_true_response() {
        let mut rng = StdRng::seed_from_u64(10);
        let (g1, g2) = two_bases(&mut rng);
        let x = random_scalar(&mut rng).unwrap();
        let proof = EqualityProof::prove(&g1, &g2, &x, &mut rng).unwrap();
        let json = serde_json::to_string(&proof).unwrap();
        let back: EqualityProof = serde_json::from_str(&json).unwrap();
        assert_eq!(back, proof);
    }
}
