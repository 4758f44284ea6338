//! Linear-equation proof over hidden witnesses.
//!
//! Proves knowledge of `x_1..x_n` with `Y = Σ G_i·x_i` and, for public
//! coefficients `a_i` and target `b`, `Σ a_i·x_i = b`. The statement is the
//! single aggregate point `Y`, not one point per term.
//!
//! The prover picks blindings with `Σ a_i·v_i = 0`, so the responses
//! satisfy `Σ a_i·s_i = −C·b` exactly when the witnesses satisfy the
//! relation. The verifier checks that alongside the usual announcement
//! equation.
//!
//! The transcript hashes bases, `Y` and `T` only. Coefficients and target
//! are not bound by the challenge, so a verifier must use its own copy of
//! the relation ([`LinearProof::verify_relation`]) rather than trust the
//! one carried in the proof.

use ark_ff::{Field, Zero};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::transcript::{compute_challenge, Challenge};
use super::wire::{WireReader, WireWriter};
use super::{
    check_arity, expected_announcement, random_blindings, reject, respond, ResponseEncoding,
};
use crate::config::{MAX_BLINDING_ATTEMPTS, POINT_ENCODED_LEN, SCALAR_ENCODED_LEN};
use crate::curve::{
    random_scalar,
    scalar::{serde_scalar, serde_scalar_vec},
    EcPoint, Scalar,
};
use crate::error::{CryptoError, Result, VerificationError};

const KIND: &str = "linear";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearProof {
    pub bases: Vec<EcPoint>,
    #[serde(with = "serde_scalar_vec")]
    pub coefficients: Vec<Scalar>,
    #[serde(with = "serde_scalar")]
    pub target: Scalar,
    /// `Y = Σ G_i·x_i`.
    pub statement: EcPoint,
    /// `T = Σ G_i·v_i` with `Σ a_i·v_i = 0`.
    pub announcement: EcPoint,
    pub challenge: Challenge,
    #[serde(with = "serde_scalar_vec")]
    pub responses: Vec<Scalar>,
}

impl LinearProof {
    /// Prove `Y = Σ bases[i]·witnesses[i]` and
    /// `Σ coefficients[i]·witnesses[i] = target`.
    ///
    /// The relation itself is not checked here: a prover with witnesses that
    /// don't satisfy it still gets a proof, and that proof fails
    /// verification.
    ///
    /// # Errors
    ///
    /// - `EmptyStatement` / `ArityMismatch` on malformed input.
    /// - `BlindingExhausted` if no usable blinding vector was drawn.
    /// - `Randomness` if the RNG fails.
    pub fn prove<R: RngCore + CryptoRng>(
        bases: &[EcPoint],
        witnesses: &[Scalar],
        coefficients: &[Scalar],
        target: &Scalar,
        rng: &mut R,
    ) -> Result<Self> {
        check_arity(bases.len(), witnesses.len())?;
        check_arity(bases.len(), coefficients.len())?;

        let statement = EcPoint::linear_combination(bases, witnesses);
        let blindings = sample_blindings(coefficients, rng)?;
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
            coefficients: coefficients.to_vec(),
            target: *target,
            statement,
            announcement,
            challenge,
            responses,
        })
    }

    /// Check the proof against the relation it carries.
    pub fn verify(&self) -> Result<()> {
        check_arity(self.bases.len(), self.responses.len())?;
        check_arity(self.bases.len(), self.coefficients.len())?;

        let recomputed = compute_challenge(&self.bases, &[self.statement], &[self.announcement]);
        if recomputed != self.challenge {
            return Err(reject(KIND, VerificationError::ChallengeMismatch));
        }
        let c = self.challenge.to_scalar();
        let t = expected_announcement(&self.bases, &self.responses, &self.statement, &c);
        if t != self.announcement {
            return Err(reject(KIND, VerificationError::ResponseMismatch { index: 0 }));
        }
        let combined: Scalar = self
            .coefficients
            .iter()
            .zip(&self.responses)
            .map(|(a, s)| *a * s)
            .sum();
        if combined != -(c * self.target) {
            return Err(reject(KIND, VerificationError::LinearCombinationMismatch));
        }
        Ok(())
    }

    /// Check that the proof is about the verifier's own relation, then
    /// verify it.
    pub fn verify_relation(&self, coefficients: &[Scalar], target: &Scalar) -> Result<()> {
        if self.coefficients != coefficients || self.target != *target {
            return Err(reject(KIND, VerificationError::StatementMismatch));
        }
        self.verify()
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    /// `n || G_1..G_n || a_1..a_n || b || Y || T || C || s_1..s_n`.
    ///
    /// Only the responses are affected by `encoding`.
    pub fn to_bytes(&self, encoding: ResponseEncoding) -> Vec<u8> {
        let wire_responses: Vec<Scalar> =
            self.responses.iter().map(|s| encoding.encode(s)).collect();
        WireWriter::default()
            .count(self.bases.len())
            .points(&self.bases)
            .scalars(&self.coefficients)
            .scalar(&self.target)
            .point(&self.statement)
            .point(&self.announcement)
            .challenge(&self.challenge)
            .scalars(&wire_responses)
            .finish()
    }

    pub fn from_bytes(bytes: &[u8], encoding: ResponseEncoding) -> Result<Self> {
        let mut r = WireReader::new(bytes);
        let n = r.count(POINT_ENCODED_LEN + 2 * SCALAR_ENCODED_LEN)?;
        let bases = r.points(n)?;
        let coefficients = r.scalars(n)?;
        let target = r.scalar()?;
        let statement = r.point()?;
        let announcement = r.point()?;
        let challenge = r.challenge()?;
        let responses = r.scalars(n)?.iter().map(|s| encoding.decode(s)).collect();
        r.finish()?;
        Ok(Self {
            bases,
            coefficients,
            target,
            statement,
            announcement,
            challenge,
            responses,
        })
    }
}

/// Draw blindings `v` with `Σ a_i·v_i = 0`.
///
/// Every index but one pivot (the first nonzero coefficient) gets a uniform
/// scalar; the pivot is solved for. A zero pivot blinding would leak that
/// witness in its response, so such draws are discarded.
fn sample_blindings<R: RngCore + CryptoRng>(
    coefficients: &[Scalar],
    rng: &mut R,
) -> Result<Vec<Scalar>> {
    let pivot = coefficients
        .iter()
        .enumerate()
        .find_map(|(i, a)| a.inverse().map(|inv| (i, inv)));

    let Some((p, a_p_inv)) = pivot else {
        // All-zero relation: any blinding vector satisfies it.
        return random_blindings(coefficients.len(), rng);
    };
    // With one nonzero coefficient the relation already pins that witness,
    // and its blinding is necessarily zero.
    let pinned = coefficients.iter().filter(|a| !a.is_zero()).count() == 1;

    for attempt in 1..=MAX_BLINDING_ATTEMPTS {
        let mut blindings = Vec::with_capacity(coefficients.len());
        let mut partial = Scalar::zero();
        for (i, a) in coefficients.iter().enumerate() {
            if i == p {
                blindings.push(Scalar::zero());
                continue;
            }
            let v = random_scalar(rng)?;
            partial += *a * v;
            blindings.push(v);
        }
        let v_p = -(partial * a_p_inv);
        if pinned || !v_p.is_zero() {
            blindings[p] = v_p;
            return Ok(blindings);
        }
        warn!(attempt, "degenerate blinding draw, resampling");
    }

    Err(CryptoError::BlindingExhausted {
        attempts: MAX_BLINDING_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::scalar_from_i64;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    fn random_bases(n: usize, rng: &mut StdRng) -> Vec<EcPoint> {
        (0..n)
            .map(|_| EcPoint::generator().scalar_mul(&random_scalar(rng).unwrap()))
            .collect()
    }

    fn coeffs(values: &[i64]) -> Vec<Scalar> {
        values.iter().map(|v| scalar_from_i64(*v)).collect()
    }

    #[test]
    fn blindings_sum_to_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        for a in [coeffs(&[-1, 1, 1]), coeffs(&[3, 0, -7, 2]), coeffs(&[0, 5])] {
            let v = sample_blindings(&a, &mut rng).unwrap();
            let sum: Scalar = a.iter().zip(&v).map(|(a, v)| *a * v).sum();
            assert!(sum.is_zero());
        }
    }

    #[test]
    fn all_zero_coefficients_accept_any_blinding() {
        let mut rng = StdRng::seed_from_u64(2);
        let v = sample_blindings(&coeffs(&[0, 0]), &mut rng).unwrap();
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn satisfied_relation_verifies() {
        let mut rng = StdRng::seed_from_u64(42);
        let g = random_bases(3, &mut rng);
        // 2·x1 − x2 + 4·x3 = 13 with x = (2, 3, 3)
        let x = coeffs(&[2, 3, 3]);
        let a = coeffs(&[2, -1, 4]);
        let b = Scalar::from(13u64);
        let proof = LinearProof::prove(&g, &x, &a, &b, &mut rng).unwrap();
        assert!(proof.is_valid());
        assert!(proof.verify_relation(&a, &b).is_ok());
    }

    #[test]
    fn unsatisfied_relation_fails_deterministically() {
        let mut rng = StdRng::seed_from_u64(43);
        let g = random_bases(3, &mut rng);
        let x = coeffs(&[10, 3, 5]);
        let a = coeffs(&[-1, 1, 1]);
        let proof = LinearProof::prove(&g, &x, &a, &Scalar::zero(), &mut rng).unwrap();
        assert_eq!(
            proof.verify(),
            Err(CryptoError::Verification(VerificationError::LinearCombinationMismatch))
        );
    }

    #[test]
    fn foreign_relation_is_a_statement_mismatch() {
        let mut rng = StdRng::seed_from_u64(44);
        let g = random_bases(2, &mut rng);
        let x = coeffs(&[4, 4]);
        let a = coeffs(&[1, -1]);
        let proof = LinearProof::prove(&g, &x, &a, &Scalar::zero(), &mut rng).unwrap();
        assert_eq!(
            proof.verify_relation(&coeffs(&[1, 1]), &Scalar::zero()),
            Err(CryptoError::Verification(VerificationError::StatementMismatch))
        );
    }

    #[test]
    fn arity_mismatch_fails_fast() {
        let mut rng = StdRng::seed_from_u64(45);
        let g = random_bases(3, &mut rng);
        let zero = Scalar::zero();
        let err = LinearProof::prove(&g, &coeffs(&[1, 2, 3]), &coeffs(&[1, 1]), &zero, &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            CryptoError::ArityMismatch {
                expected: 3,
                actual: 2
            }
        );
        let err = LinearProof::prove(&g, &coeffs(&[1]), &coeffs(&[1, 1, 1]), &zero, &mut rng)
            .unwrap_err();
        assert!(matches!(err, CryptoError::ArityMismatch { .. }));
    }

    #[test]
    fn negated_wire_encoding_round_trips() {
        let mut rng = StdRng::seed_from_u64(46);
        let g = random_bases(3, &mut rng);
        let a = coeffs(&[-1, 1, 1]);
        let x = coeffs(&[9, 4, 5]);
        let proof = LinearProof::prove(&g, &x, &a, &Scalar::zero(), &mut rng).unwrap();

        let plain = proof.to_bytes(ResponseEncoding::Plain);
        let negated = proof.to_bytes(ResponseEncoding::Negated);
        assert_ne!(plain, negated);
        assert_eq!(plain.len(), negated.len());

        let back = LinearProof::from_bytes(&negated, ResponseEncoding::Negated).unwrap();
        assert_eq!(back, proof);
        assert!(back.is_valid());

        // Decoding with the wrong convention yields a proof that fails.
        let wrong = LinearProof::from_bytes(&negated, ResponseEncoding::Plain).unwrap();
        assert!(!wrong.is_valid());
    }
}
