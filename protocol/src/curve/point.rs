//! Group elements and their wire encoding.
//!
//! [`EcPoint`] is the only way the rest of the crate touches the curve: add,
//! negate, scalar-multiply, compare, and (de)serialize. Proof code never
//! reaches into arkworks types directly.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use ark_bn254::{G1Affine, G1Projective};
use ark_ec::{CurveGroup, Group};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use super::scalar::Scalar;
use crate::config::POINT_ENCODED_LEN;
use crate::error::{CryptoError, Result};

/// A point on BN254 G1, or the point at infinity.
///
/// Addition and subtraction go through the `+`/`-` operators; negation and
/// scalar multiplication also have named forms.
///
/// Stored in projective form. Equality is projective-aware: two
/// representations of the same point compare equal.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EcPoint(G1Projective);

impl EcPoint {
    /// The point at infinity (group identity).
    pub fn identity() -> Self {
        Self(G1Projective::zero())
    }

    /// The standard G1 generator.
    pub fn generator() -> Self {
        Self(G1Projective::generator())
    }

    /// Whether this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    /// `-self`.
    pub fn negate(&self) -> Self {
        Self(-self.0)
    }

    /// `self * k`. The scalar is already reduced modulo the group order.
    pub fn scalar_mul(&self, k: &Scalar) -> Self {
        Self(self.0 * k)
    }

    /// `Σ points[i] * scalars[i]`. Callers check that the lengths agree.
    pub fn linear_combination(points: &[EcPoint], scalars: &[Scalar]) -> Self {
        debug_assert_eq!(points.len(), scalars.len());
        points
            .iter()
            .zip(scalars)
            .fold(Self::identity(), |acc, (p, k)| acc + p.scalar_mul(k))
    }

    /// Affine representation. The identity maps to arkworks' flagged
    /// `(0, 0)` affine point.
    pub fn to_affine(&self) -> G1Affine {
        self.0.into_affine()
    }

    /// Affine `(x, y)` as decimal strings, the format the Fiat-Shamir
    /// transcript hashes. The identity yields `("0", "0")`.
    pub fn decimal_coordinates(&self) -> (String, String) {
        let affine = self.to_affine();
        if affine.infinity {
            return ("0".to_string(), "0".to_string());
        }
        (
            affine.x.into_bigint().to_string(),
            affine.y.into_bigint().to_string(),
        )
    }

    /// Compressed 32-byte encoding.
    pub fn to_bytes(&self) -> [u8; POINT_ENCODED_LEN] {
        let mut out = [0u8; POINT_ENCODED_LEN];
        self.to_affine()
            .serialize_compressed(&mut out[..])
            .expect("compressed G1 point always fits in 32 bytes");
        out
    }

    /// Decode a compressed point, validating that it lies on the curve and
    /// in the prime-order subgroup.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != POINT_ENCODED_LEN {
            return Err(CryptoError::InvalidPoint(format!(
                "expected {} bytes, got {}",
                POINT_ENCODED_LEN,
                bytes.len()
            )));
        }
        let affine = G1Affine::deserialize_compressed(bytes)
            .map_err(|e| CryptoError::InvalidPoint(e.to_string()))?;
        Ok(Self(affine.into()))
    }

    /// Hex of the compressed encoding. Handy for logs and JSON.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Inverse of [`to_hex`](Self::to_hex).
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text).map_err(|e| CryptoError::InvalidPoint(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Default for EcPoint {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<G1Affine> for EcPoint {
    fn from(p: G1Affine) -> Self {
        Self(p.into())
    }
}

impl From<G1Projective> for EcPoint {
    fn from(p: G1Projective) -> Self {
        Self(p)
    }
}

impl Add for EcPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for EcPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for EcPoint {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<Scalar> for EcPoint {
    type Output = Self;

    fn mul(self, k: Scalar) -> Self {
        Self(self.0 * k)
    }
}

impl fmt::Debug for EcPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcPoint({})", self.to_hex())
    }
}

impl Serialize for EcPoint {
    fn serialize<S: Serializer>(&self, ser: S) -> std::result::Result<S::Ok, S::Error> {
        ser.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EcPoint {
    fn deserialize<D: Deserializer<'de>>(de: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(de)?;
        Self::from_hex(&text).map_err(D::Error::custom)
    }
}
