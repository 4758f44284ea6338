//! Schnorr proof of knowledge of a discrete logarithm.
//!
//! Statement `Y = G·x` over the context generator `G`. The transcript is
//! `G, Y, T`.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use super::transcript::{compute_challenge, Challenge};
use super::wire::{WireReader, WireWriter};
use super::{expected_announcement, reject, respond};
use crate::config::{CHALLENGE_LEN, POINT_ENCODED_LEN, SCALAR_ENCODED_LEN};
use crate::curve::{random_scalar, scalar::serde_scalar, CurveContext, EcPoint, Scalar};
use crate::error::{Result, VerificationError};

const KIND: &str = "dlog";

/// Wire size: `Y || T || C || S`.
pub const DLOG_PROOF_LEN: usize = 2 * POINT_ENCODED_LEN + CHALLENGE_LEN + SCALAR_ENCODED_LEN;

/// Non-interactive proof that the prover knows `x` with `Y = G·x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DlogProof {
    /// `Y = G·x`.
    pub statement: EcPoint,
    /// `T = G·v`.
    pub announcement: EcPoint,
    pub challenge: Challenge,
    /// `s = v − C·x mod r`.
    #[serde(with = "serde_scalar")]
    pub response: Scalar,
}

impl DlogProof {
    /// Prove knowledge of `x` for `Y = G·x`.
    pub fn prove<R: RngCore + CryptoRng>(
        ctx: &CurveContext,
        x: &Scalar,
        rng: &mut R,
    ) -> Result<Self> {
        let g = ctx.generator();
        let statement = g.scalar_mul(x);
        let v = random_scalar(rng)?;
        let announcement = g.scalar_mul(&v);
        let challenge = compute_challenge(&[g], &[statement], &[announcement]);
        let response = respond(&v, &challenge.to_scalar(), x);
        Ok(Self {
            statement,
            announcement,
            challenge,
            response,
        })
    }

    /// Check the proof against the context generator.
    pub fn verify(&self, ctx: &CurveContext) -> Result<()> {
        let g = ctx.generator();
        let recomputed = compute_challenge(&[g], &[self.statement], &[self.announcement]);
        if recomputed != self.challenge {
            return Err(reject(KIND, VerificationError::ChallengeMismatch));
        }
        let c = self.challenge.to_scalar();
        let t = expected_announcement(&[g], &[self.response], &self.statement, &c);
        if t != self.announcement {
            return Err(reject(KIND, VerificationError::ResponseMismatch { index: 0 }));
        }
        Ok(())
    }

    /// Boolean form of [`verify`](Self::verify).
    pub fn is_valid(&self, ctx: &CurveContext) -> bool {
        self.verify(ctx).is_ok()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        WireWriter::with_capacity(DLOG_PROOF_LEN)
            .point(&self.statement)
            .point(&self.announcement)
            .challenge(&self.challenge)
            .scalar(&self.response)
            .finish()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(bytes);
        let proof = Self {
            statement: r.point()?,
            announcement: r.point()?,
            challenge: r.challenge()?,
            response: r.scalar()?,
        };
        r.finish()?;
        Ok(proof)
    }
}
