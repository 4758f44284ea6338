//! Scalar helpers over the BN254 scalar field.
//!
//! Every scalar in the protocol (amounts, randomness, secrets, challenges,
//! responses) is an element of `Fr`, so all arithmetic is reduced modulo the
//! group order by construction. On the wire a scalar is 32 bytes,
//! big-endian.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::config::SCALAR_ENCODED_LEN;
use crate::error::{CryptoError, Result};

/// A scalar modulo the group order.
pub type Scalar = Fr;

/// Encode a scalar as fixed-width big-endian bytes.
pub fn scalar_to_bytes(s: &Scalar) -> [u8; SCALAR_ENCODED_LEN] {
    let be = s.into_bigint().to_bytes_be();
    let mut out = [0u8; SCALAR_ENCODED_LEN];
    // Left-pad: the value is right-aligned.
    out[SCALAR_ENCODED_LEN - be.len()..].copy_from_slice(&be);
    out
}

/// Interpret arbitrary big-endian bytes as an integer and reduce it modulo
/// the group order. Used for seeds, caller-supplied randomness and byte
/// messages, where any length is acceptable.
pub fn scalar_from_be_bytes(bytes: &[u8]) -> Scalar {
    if bytes.is_empty() {
        return Fr::zero();
    }
    Fr::from_be_bytes_mod_order(bytes)
}

/// Strict decoding: exactly 32 bytes holding a value below the order.
///
/// Proof responses go through this path so that a tampered scalar cannot
/// silently alias to a different, reduced value.
pub fn scalar_from_canonical_bytes(bytes: &[u8]) -> Result<Scalar> {
    if bytes.len() != SCALAR_ENCODED_LEN {
        return Err(CryptoError::InvalidScalar(format!(
            "expected {} bytes, got {}",
            SCALAR_ENCODED_LEN,
            bytes.len()
        )));
    }
    let s = Fr::from_be_bytes_mod_order(bytes);
    if scalar_to_bytes(&s)[..] != bytes[..] {
        return Err(CryptoError::InvalidScalar(
            "value is not below the group order".to_string(),
        ));
    }
    Ok(s)
}

/// Lift a signed integer into the field; negatives wrap to `order - |v|`.
pub fn scalar_from_i64(v: i64) -> Scalar {
    let magnitude = Fr::from(v.unsigned_abs());
    if v < 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Draw a uniformly random scalar.
///
/// 64 bytes are pulled from the RNG and reduced, which keeps the modulo
/// bias below 2^-250. RNG failures propagate instead of being swallowed.
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Scalar> {
    let mut wide = [0u8; 64];
    rng.try_fill_bytes(&mut wide)
        .map_err(|e| CryptoError::Randomness(e.to_string()))?;
    Ok(Fr::from_le_bytes_mod_order(&wide))
}

/// Draw a random non-zero scalar, retrying at most eight times.
pub fn random_nonzero_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Scalar> {
    for _ in 0..8 {
        let s = random_scalar(rng)?;
        if !s.is_zero() {
            return Ok(s);
        }
    }
    Err(CryptoError::Randomness(
        "random source keeps returning zero".to_string(),
    ))
}

/// Serde adapter: a scalar as a lowercase hex string.
pub mod serde_scalar {
    use super::*;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(s: &Scalar, ser: S) -> std::result::Result<S::Ok, S::Error> {
        ser.serialize_str(&hex::encode(scalar_to_bytes(s)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Scalar, D::Error> {
        let text = String::deserialize(de)?;
        let bytes = hex::decode(&text).map_err(D::Error::custom)?;
        scalar_from_canonical_bytes(&bytes).map_err(D::Error::custom)
    }
}

/// Serde adapter for `Vec<Scalar>`.
pub mod serde_scalar_vec {
    use super::*;
    use serde::{de::Error as _, ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        v: &[Scalar],
        ser: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = ser.serialize_seq(Some(v.len()))?;
        for s in v {
            seq.serialize_element(&hex::encode(scalar_to_bytes(s)))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> std::result::Result<Vec<Scalar>, D::Error> {
        let items = Vec::<String>::deserialize(de)?;
        items
            .iter()
            .map(|text| {
                let bytes = hex::decode(text).map_err(D::Error::custom)?;
                scalar_from_canonical_bytes(&bytes).map_err(D::Error::custom)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::One;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn bytes_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = random_scalar(&mut rng).unwrap();
        let bytes = scalar_to_bytes(&s);
        assert_eq!(scalar_from_canonical_bytes(&bytes).unwrap(), s);
    }

    #[test]
    fn encoding_is_big_endian() {
        let bytes = scalar_to_bytes(&Fr::from(0x0102u64));
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x02);
        assert!(bytes[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn non_canonical_scalar_rejected() {
        // 0xff..ff is far above the ~254-bit order.
        let err = scalar_from_canonical_bytes(&[0xff; 32]).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidScalar(_)));
    }

    #[test]
    fn wrong_length_scalar_rejected() {
        assert!(scalar_from_canonical_bytes(&[1u8; 31]).is_err());
        assert!(scalar_from_canonical_bytes(&[1u8; 33]).is_err());
    }

    #[test]
    fn loose_decoding_reduces() {
        // Short inputs are plain integers.
        assert_eq!(scalar_from_be_bytes(&[0x01, 0x00]), Fr::from(256u64));
        assert_eq!(scalar_from_be_bytes(&[0x00, 0x00, 0x07]), Fr::from(7u64));
    }

    #[test]
    fn signed_lift_wraps_negatives() {
        assert_eq!(scalar_from_i64(-1) + Fr::one(), Fr::zero());
        assert_eq!(scalar_from_i64(5), Fr::from(5u64));
        assert_eq!(scalar_from_i64(i64::MIN) + scalar_from_i64(i64::MAX), -Fr::one());
    }

    #[test]
    fn random_scalars_differ() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = random_nonzero_scalar(&mut rng).unwrap();
        let b = random_nonzero_scalar(&mut rng).unwrap();
        assert_ne!(a, b);
    }
}
