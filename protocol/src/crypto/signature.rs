//! # Message Signatures
//!
//! ECDSA over BN254 G1 with the same key pair used for encryption: the
//! signing key is the secret `X` and the verifying point is `H = G2·X`,
//! with `G2` as the base. Wallets, the exchange and the regulator all sign
//! their messages this way, so a party needs only one key pair.
//!
//! ```text
//! z = SHA-256(m) mod n
//! R = G2·k,  r = x(R) mod n
//! s = k⁻¹·(z + r·X)
//! ```
//!
//! Verification recomputes `G2·(z/s) + H·(r/s)` and compares its x
//! coordinate with `r`.
//!
//! Signatures are normalized to the low half of the order on signing, and
//! high-`s` signatures are rejected, so `(r, s)` and `(r, n − s)` cannot
//! both be presented for the same message.

use ark_bn254::Fr;
use ark_ff::{BigInteger, Field, PrimeField, Zero};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::keys::{PrivateKey, PublicKey};
use crate::config::{MAX_SIGNING_ATTEMPTS, SCALAR_ENCODED_LEN};
use crate::curve::{
    random_nonzero_scalar, scalar::serde_scalar, scalar_from_canonical_bytes, scalar_to_bytes,
    EcPoint, Scalar,
};
use crate::error::{CryptoError, Result, VerificationError};

/// Wire size of a [`Signature`]: `r || s`.
pub const SIGNATURE_LEN: usize = 2 * SCALAR_ENCODED_LEN;

/// An ECDSA signature `(r, s)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(with = "serde_scalar")]
    pub r: Scalar,
    #[serde(with = "serde_scalar")]
    pub s: Scalar,
}

impl Signature {
    /// Check the signature over `msg` against `public`'s `(G2, H)`.
    pub fn verify(&self, public: &PublicKey, msg: &[u8]) -> Result<()> {
        if self.r.is_zero() || self.s.is_zero() || is_high(&self.s) {
            return Err(mismatch("r or s out of range"));
        }
        // `s` is nonzero, so the inverse exists.
        let w = self.s.inverse().ok_or_else(|| mismatch("s not invertible"))?;
        let u1 = message_digest(msg) * w;
        let u2 = self.r * w;
        let point = public.g2.scalar_mul(&u1) + public.h.scalar_mul(&u2);
        match x_coordinate(&point) {
            Some(x) if x == self.r => Ok(()),
            _ => Err(mismatch("x(R) does not match r")),
        }
    }

    /// `r || s`, both big-endian.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..SCALAR_ENCODED_LEN].copy_from_slice(&scalar_to_bytes(&self.r));
        out[SCALAR_ENCODED_LEN..].copy_from_slice(&scalar_to_bytes(&self.s));
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(CryptoError::MalformedEncoding(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        Ok(Self {
            r: scalar_from_canonical_bytes(&bytes[..SCALAR_ENCODED_LEN])?,
            s: scalar_from_canonical_bytes(&bytes[SCALAR_ENCODED_LEN..])?,
        })
    }
}

/// Sign `msg` with the key pair's secret `X`.
///
/// # Errors
///
/// `Randomness` if the RNG fails, or if `MAX_SIGNING_ATTEMPTS` nonces in a
/// row produce a zero `r` or `s`.
///
/// # Examples
///
/// ```
/// use ark_std::rand::{rngs::StdRng, SeedableRng};
/// use veil_ledger::crypto::signature::{sign, verify_signature};
/// use veil_ledger::{generate_keys, CurveContext};
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let (public, private) = generate_keys(&CurveContext::bn254(), "exchange", &mut rng).unwrap();
/// let sig = sign(&private, b"settle batch 17", &mut rng).unwrap();
/// assert!(verify_signature(&public, b"settle batch 17", &sig));
/// assert!(!verify_signature(&public, b"settle batch 18", &sig));
/// ```
pub fn sign<R: RngCore + CryptoRng>(
    key: &PrivateKey,
    msg: &[u8],
    rng: &mut R,
) -> Result<Signature> {
    let z = message_digest(msg);
    let g2 = key.public_key().g2;

    for attempt in 1..=MAX_SIGNING_ATTEMPTS {
        let k = random_nonzero_scalar(rng)?;
        let r = match x_coordinate(&g2.scalar_mul(&k)) {
            Some(r) if !r.is_zero() => r,
            _ => {
                warn!(attempt, "degenerate signing nonce, resampling");
                continue;
            }
        };
        let Some(k_inv) = k.inverse() else { continue };
        let mut s = k_inv * (z + r * key.secret());
        if s.is_zero() {
            warn!(attempt, "degenerate signing nonce, resampling");
            continue;
        }
        if is_high(&s) {
            s = -s;
        }
        return Ok(Signature { r, s });
    }

    Err(CryptoError::Randomness(format!(
        "no usable signing nonce after {MAX_SIGNING_ATTEMPTS} attempts"
    )))
}

/// Boolean form of [`Signature::verify`].
pub fn verify_signature(public: &PublicKey, msg: &[u8], sig: &Signature) -> bool {
    sig.verify(public, msg).is_ok()
}

/// SHA-256 of the message, read big-endian and reduced modulo the order.
pub fn message_digest(msg: &[u8]) -> Scalar {
    Fr::from_be_bytes_mod_order(&Sha256::digest(msg))
}

/// Affine x coordinate reduced into the scalar field; `None` for the
/// identity.
fn x_coordinate(point: &EcPoint) -> Option<Scalar> {
    let affine = point.to_affine();
    if affine.infinity {
        return None;
    }
    Some(Fr::from_be_bytes_mod_order(
        &affine.x.into_bigint().to_bytes_be(),
    ))
}

fn is_high(s: &Scalar) -> bool {
    s.into_bigint() > Fr::MODULUS_MINUS_ONE_DIV_TWO
}

fn mismatch(reason: &'static str) -> CryptoError {
    debug!(reason, "signature rejected");
    CryptoError::Verification(VerificationError::SignatureMismatch)
}
