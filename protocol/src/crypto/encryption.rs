//! # Dual-Point ElGamal Encryption
//!
//! A value `v` is encrypted under a public key with fresh randomness `r` as:
//!
//! ```text
//! P1 = v·G1 + r·H
//! P2 = r·G2
//! ```
//!
//! `P1` is also a Pedersen commitment to `v` with randomness `r`, which is
//! what lets a format proof tie a ciphertext to a commitment. The key holder
//! strips the mask with `P1 − X·P2 = v·G1` and then recovers `v` by bounded
//! search.
//!
//! ## Bounded plaintexts
//!
//! There is no trapdoor for `v·G1 → v`. Decryption only succeeds for
//! `v < VALUE_DECRYPT_BOUND` (2^18); anything above that is `OutOfRange`,
//! never a silently wrong value. The bound is part of the protocol: a
//! sender that encrypts a larger value has produced something no one can
//! read.
//!
//! The generic byte-message path ([`encrypt_message`]/[`decrypt_message`])
//! works the same way with its own, smaller bound.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::commitment::Commitment;
use super::keys::{PrivateKey, PublicKey};
use super::search::DecryptionTable;
use crate::config::{
    ADDRESS_VALUE_LEN, MESSAGE_DECRYPT_BOUND, POINT_ENCODED_LEN, VALUE_DECRYPT_BOUND,
};
use crate::curve::{random_scalar, scalar_from_be_bytes, EcPoint, Scalar};
use crate::error::{CryptoError, Result};

/// Wire size of a ciphertext: `P1 || P2`.
pub const CYPHERTEXT_LEN: usize = 2 * POINT_ENCODED_LEN;

// ---------------------------------------------------------------------------
// CypherText
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CypherText {
    /// `v·G1 + r·H`.
    pub p1: EcPoint,
    /// `r·G2`.
    pub p2: EcPoint,
}

impl CypherText {
    pub fn to_bytes(&self) -> [u8; CYPHERTEXT_LEN] {
        let mut out = [0u8; CYPHERTEXT_LEN];
        out[..POINT_ENCODED_LEN].copy_from_slice(&self.p1.to_bytes());
        out[POINT_ENCODED_LEN..].copy_from_slice(&self.p2.to_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CYPHERTEXT_LEN {
            return Err(CryptoError::MalformedEncoding(format!(
                "ciphertext must be {} bytes, got {}",
                CYPHERTEXT_LEN,
                bytes.len()
            )));
        }
        Ok(Self {
            p1: EcPoint::from_bytes(&bytes[..POINT_ENCODED_LEN])?,
            p2: EcPoint::from_bytes(&bytes[POINT_ENCODED_LEN..])?,
        })
    }

    /// `P1 − X·P2`, i.e. `v·G1` for an honest ciphertext.
    fn unmask(&self, key: &PrivateKey) -> EcPoint {
        self.p1 - self.p2.scalar_mul(key.secret())
    }
}

// ---------------------------------------------------------------------------
// Encrypt
// ---------------------------------------------------------------------------

fn encrypt_scalar(public: &PublicKey, v: &Scalar, r: &Scalar) -> CypherText {
    CypherText {
        p1: public.g1.scalar_mul(v) + public.h.scalar_mul(r),
        p2: public.g2.scalar_mul(r),
    }
}

/// Encrypt an amount and return the ciphertext, the matching commitment
/// (same point as `P1`, same randomness) and the randomness itself.
///
/// The randomness must be kept by the sender: it is the witness for the
/// format proof.
pub fn encrypt_value<R: RngCore + CryptoRng>(
    public: &PublicKey,
    v: u64,
    rng: &mut R,
) -> Result<(CypherText, Commitment, Scalar)> {
    let r = random_scalar(rng)?;
    let ct = encrypt_scalar(public, &Scalar::from(v), &r);
    let commitment = Commitment {
        point: ct.p1,
        randomness: r,
    };
    Ok((ct, commitment, r))
}

/// Recover an amount in `[0, VALUE_DECRYPT_BOUND)`.
///
/// # Errors
///
/// `OutOfRange { bound: VALUE_DECRYPT_BOUND }` when the plaintext is at or
/// above the bound, or when the ciphertext was not made for this key.
pub fn decrypt_value(key: &PrivateKey, ct: &CypherText) -> Result<u64> {
    ValueDecryptor::new(key).decrypt(ct)
}

/// Decrypt many ciphertexts under one key, sharing a single search table.
/// Results are positional; one failure does not affect the others.
pub fn decrypt_values(key: &PrivateKey, cts: &[CypherText]) -> Vec<Result<u64>> {
    let decryptor = ValueDecryptor::new(key);
    cts.iter().map(|ct| decryptor.decrypt(ct)).collect()
}

/// A private key with its value-domain search table built once.
///
/// Useful for a wallet scanning a ledger: building the table costs a few
/// hundred point additions, solving costs a few hundred more.
pub struct ValueDecryptor<'a> {
    key: &'a PrivateKey,
    table: DecryptionTable,
}

impl<'a> ValueDecryptor<'a> {
    pub fn new(key: &'a PrivateKey) -> Self {
        Self {
            key,
            table: DecryptionTable::new(&key.public_key().g1, VALUE_DECRYPT_BOUND),
        }
    }

    pub fn decrypt(&self, ct: &CypherText) -> Result<u64> {
        self.table.solve(&ct.unmask(self.key)).map_err(|e| {
            debug!(bound = VALUE_DECRYPT_BOUND, "value ciphertext did not decrypt");
            e
        })
    }
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// The first eight bytes of an address as a big-endian `u64`.
///
/// # Errors
///
/// `InvalidScalar` if the address is shorter than eight bytes.
pub fn address_to_value(address: &[u8]) -> Result<u64> {
    let head: [u8; ADDRESS_VALUE_LEN] = address
        .get(..ADDRESS_VALUE_LEN)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| {
            CryptoError::InvalidScalar(format!(
                "address must be at least {} bytes, got {}",
                ADDRESS_VALUE_LEN,
                address.len()
            ))
        })?;
    Ok(u64::from_be_bytes(head))
}

/// Encrypt an address through the value path.
///
/// Most address values exceed the decryption bound, so the ciphertext is
/// useful for proofs (see `prove_same_address`) rather than for decryption.
pub fn encrypt_address<R: RngCore + CryptoRng>(
    public: &PublicKey,
    address: &[u8],
    rng: &mut R,
) -> Result<(CypherText, Commitment, Scalar)> {
    encrypt_value(public, address_to_value(address)?, rng)
}

// ---------------------------------------------------------------------------
// Byte messages
// ---------------------------------------------------------------------------

/// Encrypt a short byte message, read as a big-endian integer.
///
/// Only messages whose integer value is below `MESSAGE_DECRYPT_BOUND` can
/// be decrypted again.
pub fn encrypt_message<R: RngCore + CryptoRng>(
    public: &PublicKey,
    message: &[u8],
    rng: &mut R,
) -> Result<CypherText> {
    let r = random_scalar(rng)?;
    Ok(encrypt_scalar(public, &scalar_from_be_bytes(message), &r))
}

/// Recover a message as the minimal big-endian encoding of its integer
/// value (so `0` decrypts to an empty vector and leading zero bytes of the
/// original message are not preserved).
///
/// # Errors
///
/// `OutOfRange { bound: MESSAGE_DECRYPT_BOUND }` if the value is not below
/// the bound.
pub fn decrypt_message(key: &PrivateKey, ct: &CypherText) -> Result<Vec<u8>> {
    let table = DecryptionTable::new(&key.public_key().g1, MESSAGE_DECRYPT_BOUND);
    let v = table.solve(&ct.unmask(key))?;
    let bytes = v.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    Ok(bytes[first..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::commitment::verify_commitment;
    use crate::crypto::keys::generate_keys;
    use crate::curve::CurveContext;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    fn keys(seed: &str, rng: &mut StdRng) -> (PublicKey, PrivateKey) {
        generate_keys(&CurveContext::bn254(), seed, rng).unwrap()
    }

    #[test]
    fn encrypt_then_decrypt_across_the_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let (public, private) = keys("alice", &mut rng);
        for v in [0u64, 1, 20, 1_000, 65_536, VALUE_DECRYPT_BOUND - 1] {
            let (ct, _, _) = encrypt_value(&public, v, &mut rng).unwrap();
            assert_eq!(decrypt_value(&private, &ct).unwrap(), v, "v = {v}");
        }
    }

    #[test]
    fn values_at_or_above_the_bound_are_out_of_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let (public, private) = keys("alice", &mut rng);
        for v in [VALUE_DECRYPT_BOUND, VALUE_DECRYPT_BOUND + 1, u64::MAX] {
            let (ct, _, _) = encrypt_value(&public, v, &mut rng).unwrap();
            assert_eq!(
                decrypt_value(&private, &ct),
                Err(CryptoError::OutOfRange {
                    bound: VALUE_DECRYPT_BOUND
                })
            );
        }
    }

    #[test]
    fn ciphertext_point_is_the_commitment() {
        let mut rng = StdRng::seed_from_u64(2);
        let (public, _) = keys("alice", &mut rng);
        let (ct, commitment, r) = encrypt_value(&public, 20, &mut rng).unwrap();
        assert_eq!(ct.p1, commitment.point);
        assert_eq!(commitment.randomness, r);
        assert_eq!(ct.p2, public.g2.scalar_mul(&r));
        assert!(verify_commitment(&public, &commitment));
    }

    #[test]
    fn wrong_key_does_not_decrypt() {
        let mut rng = StdRng::seed_from_u64(3);
        let (public, _) = keys("alice", &mut rng);
        let (_, mallory) = keys("mallory", &mut rng);
        let (ct, _, _) = encrypt_value(&public, 7, &mut rng).unwrap();
        assert!(decrypt_value(&mallory, &ct).is_err());
    }

    #[test]
    fn batch_decryption_is_positional() {
        let mut rng = StdRng::seed_from_u64(4);
        let (public, private) = keys("alice", &mut rng);
        let cts: Vec<CypherText> = [5u64, VALUE_DECRYPT_BOUND, 99]
            .iter()
            .map(|v| encrypt_value(&public, *v, &mut rng).unwrap().0)
            .collect();
        let out = decrypt_values(&private, &cts);
        assert_eq!(out[0], Ok(5));
        assert!(out[1].is_err());
        assert_eq!(out[2], Ok(99));
    }

    #[test]
    fn address_adapter_reads_first_eight_bytes() {
        let addr = [0, 0, 0, 0, 0, 0, 0x01, 0x02, 0xaa, 0xbb];
        assert_eq!(address_to_value(&addr).unwrap(), 0x0102);
        assert!(matches!(
            address_to_value(&[1, 2, 3]),
            Err(CryptoError::InvalidScalar(_))
        ));

        let mut rng = StdRng::seed_from_u64(5);
        let (public, private) = keys("alice", &mut rng);
        let (ct, _, _) = encrypt_address(&public, &addr, &mut rng).unwrap();
        assert_eq!(decrypt_value(&private, &ct).unwrap(), 0x0102);
    }

    #[test]
    fn message_round_trip_and_bound() {
        let mut rng = StdRng::seed_from_u64(6);
        let (public, private) = keys("alice", &mut rng);

        let ct = encrypt_message(&public, &[0x01, 0x2c], &mut rng).unwrap();
        assert_eq!(decrypt_message(&private, &ct).unwrap(), vec![0x01, 0x2c]);

        let ct = encrypt_message(&public, &[], &mut rng).unwrap();
        assert!(decrypt_message(&private, &ct).unwrap().is_empty());

        // 0xffff = 65535 is above the 50,000 message bound.
        let ct = encrypt_message(&public, &[0xff, 0xff], &mut rng).unwrap();
        assert_eq!(
            decrypt_message(&private, &ct),
            Err(CryptoError::OutOfRange {
                bound: MESSAGE_DECRYPT_BOUND
            })
        );
    }

    #[test]
    fn ciphertext_bytes_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let (public, _) = keys("alice", &mut rng);
        let (ct, _, _) = encrypt_value(&public, 3, &mut rng).unwrap();
        assert_eq!(CypherText::from_bytes(&ct.to_bytes()).unwrap(), ct);
        assert!(CypherText::from_bytes(&[0u8; 63]).is_err());
    }
}
