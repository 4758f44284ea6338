//! Fiat-Shamir challenge derivation.
//!
//! The challenge is SHA-256 over the decimal x then y coordinate of every
//! point, concatenated as text, in the fixed order: public bases, statement
//! points, announcement points. There are no labels, separators or length
//! prefixes. That is the interoperable format; do not "improve" it without
//! changing every verifier at the same time.

use std::fmt;

use ark_bn254::Fr;
use ark_ff::PrimeField;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::config::CHALLENGE_LEN;
use crate::curve::{EcPoint, Scalar};
use crate::error::{CryptoError, Result};

/// A 32-byte Fiat-Shamir challenge (raw SHA-256 digest).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Challenge([u8; CHALLENGE_LEN]);

impl Challenge {
    /// Wrap raw digest bytes.
    pub fn from_array(bytes: [u8; CHALLENGE_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode from a slice; must be exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; CHALLENGE_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidScalar(format!(
                "challenge must be {} bytes, got {}",
                CHALLENGE_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; CHALLENGE_LEN] {
        &self.0
    }

    /// The digest read as a big-endian integer, reduced modulo the order.
    pub fn to_scalar(&self) -> Scalar {
        Fr::from_be_bytes_mod_order(&self.0)
    }
}

impl fmt::Debug for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Challenge({})", hex::encode(self.0))
    }
}

impl Serialize for Challenge {
    fn serialize<S: Serializer>(&self, ser: S) -> std::result::Result<S::Ok, S::Error> {
        ser.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Challenge {
    fn deserialize<D: Deserializer<'de>>(de: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(de)?;
        let bytes = hex::decode(&text).map_err(D::Error::custom)?;
        Self::from_bytes(&bytes).map_err(D::Error::custom)
    }
}

/// Feed each point's decimal coordinates into the hasher, x before y.
fn absorb(hasher: &mut Sha256, points: &[EcPoint]) {
    for p in points {
        let (x, y) = p.decimal_coordinates();
        hasher.update(x.as_bytes());
        hasher.update(y.as_bytes());
    }
}

/// Derive the challenge for a proof with the given public bases, statement
/// points and announcement points.
pub fn compute_challenge(
    bases: &[EcPoint],
    statements: &[EcPoint],
    announcements: &[EcPoint],
) -> Challenge {
    let mut hasher = Sha256::new();
    absorb(&mut hasher, bases);
    absorb(&mut hasher, statements);
    absorb(&mut hasher, announcements);
    let mut out = [0u8; CHALLENGE_LEN];
    out.copy_from_slice(&hasher.finalize());
    Challenge(out)
}
