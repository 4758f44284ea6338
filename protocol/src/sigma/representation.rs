//! k-base Schnorr: knowledge of a representation `Y = Σ G_i·x_i`.
//!
//! The bases travel with the proof; a verifier that cares which bases were
//! used must compare them against its own (the compositions do).

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use super::transcript::{compute_challenge, Challenge};
use super::wire::{WireReader, WireWriter};
use super::{check_arity, expected_announcement, random_blindings, reject, respond};
use crate::config::{POINT_ENCODED_LEN, SCALAR_ENCODED_LEN};
use crate::curve::{scalar::serde_scalar_vec, EcPoint, Scalar};
use crate::error::{Result, VerificationError};

const KIND: &str = "representation";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentationProof {
    pub bases: Vec<EcPoint>,
    /// `Y = Σ G_i·x_i`.
    pub statement: EcPoint,
    /// `T = Σ G_i·v_i`.
    pub announcement: EcPoint,
    pub challenge: Challenge,
    /// `s_i = v_i − C·x_i mod r`, one per base.
    #[serde(with = "serde_scalar_vec")]
    pub responses: Vec<Scalar>,
}

impl RepresentationProof {
    /// Prove knowledge of `witnesses` with `Y = Σ bases[i]·witnesses[i]`.
    ///
    /// # Errors
    ///
    /// `EmptyStatement` for zero bases, `ArityMismatch` when the witness
    /// count differs from the base count.
    pub fn prove<R: RngCore + CryptoRng>(
        bases: &[EcPoint],
        witnesses: &[Scalar],
        rng: &mut R,
    ) -> Result<Self> {
        check_arity(bases.len(), witnesses.len())?;

        let statement = EcPoint::linear_combination(bases, witnesses);
        let blindings = random_blindings(bases.len(), rng)?;
        let announcement = EcPoint::linear_combination(bases, &blindings);

        let challenge = compute_challenge(bases, &[statement], &[announcement]);
        let c = challenge.to_scalar();
        let responses = blindings
            .iter()
            .zip(witnesses)
            .map(|(v, x)| respond(v, &c, x))
            .collect();

        Ok(Self {
            bases: bases.to_vec(),
            statement,
            announcement,
            challenge,
            responses,
        })
    }

    pub fn verify(&self) -> Result<()> {
        check_arity(self.bases.len(), self.responses.len())?;

        let recomputed = compute_challenge(&self.bases, &[self.statement], &[self.announcement]);
        if recomputed != self.challenge {
            return Err(reject(KIND, VerificationError::ChallengeMismatch));
        }
        let t = expected_announcement(
            &self.bases,
            &self.responses,
            &self.statement,
            &self.challenge.to_scalar(),
        );
        if t != self.announcement {
            return Err(reject(KIND, VerificationError::ResponseMismatch { index: 0 }));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    /// `n || G_1..G_n || Y || T || C || s_1..s_n`, `n` as big-endian `u32`.
    pub fn to_bytes(&self) -> Vec<u8> {
        WireWriter::default()
            .count(self.bases.len())
            .points(&self.bases)
            .point(&self.statement)
            .point(&self.announcement)
            .challenge(&self.challenge)
            .scalars(&self.responses)
            .finish()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(bytes);
        let n = r.count(POINT_ENCODED_LEN + SCALAR_ENCODED_LEN)?;
        let proof = Self {
            bases: r.points(n)?,
            statement: r.point()?,
            announcement: r.point()?,
            challenge: r.challenge()?,
            responses: r.scalars(n)?,
        };
        r.finish()?;
        Ok(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::random_scalar;
    use crate::error::CryptoError;
    use ark_bn254::Fr;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    fn bases(n: usize, rng: &mut StdRng) -> Vec<EcPoint> {
        (0..n)
            .map(|_| EcPoint::generator().scalar_mul(&random_scalar(rng).unwrap()))
            .collect()
    }

    fn witnesses(n: usize, rng: &mut StdRng) -> Vec<Scalar> {
        (0..n).map(|_| random_scalar(rng).unwrap()).collect()
    }

    #[test]
    fn honest_proofs_verify_for_several_arities() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..=4 {
            let g = bases(n, &mut rng);
            let x = witnesses(n, &mut rng);
            let proof = RepresentationProof::prove(&g, &x, &mut rng).unwrap();
            assert_eq!(proof.statement, EcPoint::linear_combination(&g, &x));
            assert!(proof.is_valid(), "arity {n} failed");
        }
    }

    #[test]
    fn arity_mismatch_fails_fast() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = bases(3, &mut rng);
        let x = witnesses(2, &mut rng);
        assert_eq!(
            RepresentationProof::prove(&g, &x, &mut rng),
            Err(CryptoError::ArityMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            RepresentationProof::prove(&[], &[], &mut rng),
            Err(CryptoError::EmptyStatement)
        );
    }

    #[test]
    fn dropped_response_is_an_arity_error_not_a_panic() {
        let mut rng = StdRng::seed_from_u64(2);
        let g = bases(2, &mut rng);
        let x = witnesses(2, &mut rng);
        let mut proof = RepresentationProof::prove(&g, &x, &mut rng).unwrap();
        proof.responses.pop();
        assert!(matches!(proof.verify(), Err(CryptoError::ArityMismatch { .. })));
    }

    #[test]
    fn swapped_bases_fail_challenge() {
        let mut rng = StdRng::seed_from_u64(3);
        let g = bases(2, &mut rng);
        let x = witnesses(2, &mut rng);
        let mut proof = RepresentationProof::prove(&g, &x, &mut rng).unwrap();
        proof.bases.swap(0, 1);
        assert_eq!(
            proof.verify(),
            Err(CryptoError::Verification(VerificationError::ChallengeMismatch))
        );
    }

    #[test]
    fn tampered_response_fails() {
        let mut rng = StdRng::seed_from_u64(4);
        let g = bases(3, &mut rng);
        let x = witnesses(3, &mut rng);
        let mut proof = RepresentationProof::prove(&g, &x, &mut rng).unwrap();
        proof.responses[2] += Fr::from(1u64);
        assert_eq!(
            proof.verify(),
            Err(CryptoError::Verification(VerificationError::ResponseMismatch { index: 0 }))
        );
    }

    #[test]
    fn bytes_round_trip() {
        let mut rng = StdRng::seed_from_u64(5);
        let g = bases(3, &mut rng);
        let x = witnesses(3, &mut rng);
        let proof = RepresentationProof::prove(&g, &x, &mut rng).unwrap();
        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), 4 + 5 * 32 + 32 + 3 * 32);
        let back = RepresentationProof::from_bytes(&bytes).unwrap();
        assert_eq!(back, proof);
        assert!(back.is_valid());
    }
}
