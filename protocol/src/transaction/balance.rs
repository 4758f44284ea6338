//! Balance proof: spent = sent + returned.
//!
//! A linear-equation proof over the three commitment points of a transfer
//! (spent `O`, sent `S`, returned `R`) as bases, with the three amounts as
//! witnesses, coefficients `(−1, 1, 1)` and target `0`.
//!
//! Bases, coefficients and target are all implied by the transaction, so
//! the wire form only carries `Y`, `T`, `C` and the three responses, the
//! responses negated.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::config::{
    BALANCE_COEFFICIENTS, BALANCE_TARGET, CHALLENGE_LEN, POINT_ENCODED_LEN, SCALAR_ENCODED_LEN,
};
use crate::curve::{scalar::serde_scalar, scalar_from_i64, EcPoint, Scalar};
use crate::error::Result;
use crate::sigma::wire::{WireReader, WireWriter};
use crate::sigma::{Challenge, LinearProof, ResponseEncoding};

/// Wire encoding of balance-proof responses.
pub const BALANCE_RESPONSE_ENCODING: ResponseEncoding = ResponseEncoding::Negated;

/// Wire size: `Y || T || C || s_O || s_S || s_R`.
pub const BALANCE_PROOF_LEN: usize =
    2 * POINT_ENCODED_LEN + CHALLENGE_LEN + 3 * SCALAR_ENCODED_LEN;

/// The three commitment points of a transfer, in relation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceCommitments {
    pub spent: EcPoint,
    pub sent: EcPoint,
    pub returned: EcPoint,
}

impl BalanceCommitments {
    fn bases(&self) -> [EcPoint; 3] {
        [self.spent, self.sent, self.returned]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceProof {
    pub statement: EcPoint,
    pub announcement: EcPoint,
    pub challenge: Challenge,
    /// True responses for `(spent, sent, returned)`.
    #[serde(with = "serde_responses")]
    pub responses: [Scalar; 3],
}

fn balance_coefficients() -> Vec<Scalar> {
    BALANCE_COEFFICIENTS.iter().map(|a| scalar_from_i64(*a)).collect()
}

impl BalanceProof {
    /// Rebuild the full linear proof against the verifier's commitments.
    fn to_linear(&self, commitments: &BalanceCommitments) -> LinearProof {
        LinearProof {
            bases: commitments.bases().to_vec(),
            coefficients: balance_coefficients(),
            target: scalar_from_i64(BALANCE_TARGET),
            statement: self.statement,
            announcement: self.announcement,
            challenge: self.challenge,
            responses: self.responses.to_vec(),
        }
    }

    pub fn verify(&self, commitments: &BalanceCommitments) -> Result<()> {
        self.to_linear(commitments).verify()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let wire: Vec<Scalar> = self
            .responses
            .iter()
            .map(|s| BALANCE_RESPONSE_ENCODING.encode(s))
            .collect();
        WireWriter::with_capacity(BALANCE_PROOF_LEN)
            .point(&self.statement)
            .point(&self.announcement)
            .challenge(&self.challenge)
            .scalars(&wire)
            .finish()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(bytes);
        let statement = r.point()?;
        let announcement = r.point()?;
        let challenge = r.challenge()?;
        let mut responses = [Scalar::from(0u64); 3];
        for s in responses.iter_mut() {
            *s = BALANCE_RESPONSE_ENCODING.decode(&r.scalar()?);
        }
        r.finish()?;
        Ok(Self {
            statement,
            announcement,
            challenge,
            responses,
        })
    }
}

/// Prove `spent = sent + returned` over the transfer's commitments.
///
/// Values that don't balance still produce a proof; verification rejects
/// it deterministically.
pub fn prove_balance<R: RngCore + CryptoRng>(
    commitments: &BalanceCommitments,
    spent: u64,
    sent: u64,
    returned: u64,
    rng: &mut R,
) -> Result<BalanceProof> {
    let witnesses = [Scalar::from(spent), Scalar::from(sent), Scalar::from(returned)];
    let linear = LinearProof::prove(
        &commitments.bases(),
        &witnesses,
        &balance_coefficients(),
        &scalar_from_i64(BALANCE_TARGET),
        rng,
    )?;
    let responses = [linear.responses[0], linear.responses[1], linear.responses[2]];
    Ok(BalanceProof {
        statement: linear.statement,
        announcement: linear.announcement,
        challenge: linear.challenge,
        responses,
    })
}

/// Boolean entry point for transaction validators.
pub fn verify_balance_proof(commitments: &BalanceCommitments, proof: &BalanceProof) -> bool {
    proof.verify(commitments).is_ok()
}

mod serde_responses {
    use super::*;
    use serde::{de::Error as _, Deserializer, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Hex(#[serde(with = "serde_scalar")] Scalar);

    pub fn serialize<S: Serializer>(
        v: &[Scalar; 3],
        ser: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        [Hex(v[0]), Hex(v[1]), Hex(v[2])].serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> std::result::Result<[Scalar; 3], D::Error> {
        let items = Vec::<Hex>::deserialize(de)?;
        match items.as_slice() {
            [a, b, c] => Ok([a.0, b.0, c.0]),
            _ => Err(D::Error::invalid_length(items.len(), &"three responses")),
        }
    }
}
