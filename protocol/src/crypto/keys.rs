//! # Key Material
//!
//! Dual-base key pairs for confidential amounts.
//!
//! A [`PublicKey`] carries three points:
//!
//! - `G1`: the value base. Amounts are committed as `v·G1`. It is drawn
//!   fresh for every key pair, so two keys from the same seed still have
//!   different `G1`s.
//! - `G2`: the mask base, always the curve generator.
//! - `H = G2·X`: the blinding base, tied to the secret scalar `X`.
//!
//! The secret `X` is derived deterministically from a seed string (its bytes
//! read as a big-endian integer). Only the holder of `X` can strip the mask
//! off a ciphertext; everyone else can only verify proofs about it.
//!
//! ## Serialization
//!
//! [`PrivateKey`] does not implement `Serialize`. Secrets are exported
//! only through [`KeyRecord`], the hex string form the wallet tooling
//! stores. Public keys travel as
//! [`WirePublicKey`] (raw compressed points plus the group order).
//!
//! Secret scalars are never logged and never appear in `Debug` output.

use std::fmt;

use ark_ff::Zero;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{POINT_ENCODED_LEN, SCALAR_ENCODED_LEN};
use crate::curve::{
    random_nonzero_scalar, scalar_from_be_bytes, scalar_from_canonical_bytes, scalar_to_bytes,
    CurveContext, EcPoint, Scalar,
};
use crate::error::{CryptoError, Result};

/// Wire size of a [`WirePublicKey`]: three points and the order.
pub const WIRE_PUBLIC_KEY_LEN: usize = 3 * POINT_ENCODED_LEN + SCALAR_ENCODED_LEN;

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// The public half of a key pair. Safe to hand to anyone.
///
/// The group order is implied by the curve context and is only written out
/// in the wire and export forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// Value base.
    pub g1: EcPoint,
    /// Mask base (the curve generator).
    pub g2: EcPoint,
    /// Blinding base, `G2·X`.
    pub h: EcPoint,
}

impl PublicKey {
    /// Flatten into the transport form.
    pub fn to_wire(&self, ctx: &CurveContext) -> WirePublicKey {
        WirePublicKey {
            g1: self.g1.to_bytes(),
            g2: self.g2.to_bytes(),
            h: self.h.to_bytes(),
            order: ctx.order_bytes(),
        }
    }

    /// Rebuild from the transport form.
    ///
    /// # Errors
    ///
    /// `InvalidPoint` if any point fails to decode, `OrderMismatch` if the
    /// record was produced for a different group.
    pub fn from_wire(ctx: &CurveContext, wire: &WirePublicKey) -> Result<Self> {
        if wire.order != ctx.order_bytes() {
            return Err(CryptoError::OrderMismatch);
        }
        Ok(Self {
            g1: EcPoint::from_bytes(&wire.g1)?,
            g2: EcPoint::from_bytes(&wire.g2)?,
            h: EcPoint::from_bytes(&wire.h)?,
        })
    }
}

// ---------------------------------------------------------------------------
// WirePublicKey
// ---------------------------------------------------------------------------

/// Transport form of a public key: compressed `G1`, `G2`, `H` and the
/// big-endian group order, exactly as embedded in transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePublicKey {
    pub g1: [u8; POINT_ENCODED_LEN],
    pub g2: [u8; POINT_ENCODED_LEN],
    pub h: [u8; POINT_ENCODED_LEN],
    pub order: [u8; SCALAR_ENCODED_LEN],
}

impl WirePublicKey {
    /// `G1 || G2 || H || order`.
    pub fn to_bytes(&self) -> [u8; WIRE_PUBLIC_KEY_LEN] {
        let mut out = [0u8; WIRE_PUBLIC_KEY_LEN];
        out[..32].copy_from_slice(&self.g1);
        out[32..64].copy_from_slice(&self.g2);
        out[64..96].copy_from_slice(&self.h);
        out[96..].copy_from_slice(&self.order);
        out
    }

    /// Split a 128-byte record. Only the length is checked here; point
    /// validation happens in [`PublicKey::from_wire`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != WIRE_PUBLIC_KEY_LEN {
            return Err(CryptoError::MalformedEncoding(format!(
                "public key record must be {} bytes, got {}",
                WIRE_PUBLIC_KEY_LEN,
                bytes.len()
            )));
        }
        let mut wire = Self {
            g1: [0u8; 32],
            g2: [0u8; 32],
            h: [0u8; 32],
            order: [0u8; 32],
        };
        wire.g1.copy_from_slice(&bytes[..32]);
        wire.g2.copy_from_slice(&bytes[32..64]);
        wire.h.copy_from_slice(&bytes[64..96]);
        wire.order.copy_from_slice(&bytes[96..]);
        Ok(wire)
    }
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A public key together with its secret scalar `X`.
///
/// Invariant: `public.h == public.g2 · secret`. Every constructor enforces
/// it, so decryption with a `PrivateKey` is always consistent with
/// encryption under its `PublicKey`.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    public: PublicKey,
    secret: Scalar,
}

impl PrivateKey {
    /// Pair a public key with a secret, checking `H = G2·X`.
    pub fn from_parts(public: PublicKey, secret: Scalar) -> Result<Self> {
        if public.g2.scalar_mul(&secret) != public.h {
            return Err(CryptoError::KeyMismatch);
        }
        Ok(Self { public, secret })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// The secret scalar. Handle with care; never log it.
    pub fn secret(&self) -> &Scalar {
        &self.secret
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Derive a key pair from `seed`.
///
/// `X` is the seed's UTF-8 bytes read as a big-endian integer, reduced
/// modulo the order; the same seed always yields the same `X` and `H`.
/// `G1 = G·v` for a fresh random `v`, so `G1` differs on every call.
///
/// # Errors
///
/// - `DegenerateSeed` if the seed reduces to zero (e.g. the empty string),
///   which would make `H` the identity and every ciphertext unmasked.
/// - `Randomness` if the RNG fails.
///
/// # Examples
///
/// ```
/// use ark_std::rand::{rngs::StdRng, SeedableRng};
/// use veil_ledger::crypto::keys::generate_keys;
/// use veil_ledger::curve::CurveContext;
///
/// let ctx = CurveContext::bn254();
/// let mut rng = StdRng::seed_from_u64(7);
/// let (public, private) = generate_keys(&ctx, "alice", &mut rng).unwrap();
/// assert_eq!(private.public_key(), &public);
/// assert_eq!(public.g2, ctx.generator());
/// ```
pub fn generate_keys<R: RngCore + CryptoRng>(
    ctx: &CurveContext,
    seed: &str,
    rng: &mut R,
) -> Result<(PublicKey, PrivateKey)> {
    if seed.is_empty() {
        return Err(CryptoError::DegenerateSeed);
    }
    let secret = scalar_from_be_bytes(seed.as_bytes());
    if secret.is_zero() {
        return Err(CryptoError::DegenerateSeed);
    }

    let g2 = ctx.generator();
    let g1 = ctx.mul_generator(&random_nonzero_scalar(rng)?);
    let public = PublicKey {
        g1,
        g2,
        h: g2.scalar_mul(&secret),
    };
    debug!(h = %public.h.to_hex(), "generated key pair");

    Ok((public, PrivateKey { public, secret }))
}

// ---------------------------------------------------------------------------
// KeyRecord
// ---------------------------------------------------------------------------

/// Hex string export of a private key, in the field layout the wallet and
/// regulator tooling already read: `G1`, `G2`, `P` (the group order),
/// `publickey` (`H`) and `privatekey` (`X`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    #[serde(rename = "G1")]
    pub g1: String,
    #[serde(rename = "G2")]
    pub g2: String,
    #[serde(rename = "P")]
    pub order: String,
    #[serde(rename = "publickey")]
    pub public_key: String,
    #[serde(rename = "privatekey")]
    pub private_key: String,
}

impl KeyRecord {
    pub fn from_private_key(ctx: &CurveContext, key: &PrivateKey) -> Self {
        Self {
            g1: key.public.g1.to_hex(),
            g2: key.public.g2.to_hex(),
            order: hex::encode(ctx.order_bytes()),
            public_key: key.public.h.to_hex(),
            private_key: hex::encode(scalar_to_bytes(&key.secret)),
        }
    }

    /// Parse and validate the record: points must decode, the order must be
    /// this curve's, and the secret must reproduce `publickey`.
    pub fn to_private_key(&self, ctx: &CurveContext) -> Result<PrivateKey> {
        let order =
            hex::decode(&self.order).map_err(|e| CryptoError::InvalidScalar(e.to_string()))?;
        if order[..] != ctx.order_bytes()[..] {
            return Err(CryptoError::OrderMismatch);
        }
        let public = PublicKey {
            g1: EcPoint::from_hex(&self.g1)?,
            g2: EcPoint::from_hex(&self.g2)?,
            h: EcPoint::from_hex(&self.public_key)?,
        };
        let secret_bytes =
            hex::decode(&self.private_key).map_err(|e| CryptoError::InvalidScalar(e.to_string()))?;
        let secret = scalar_from_canonical_bytes(&secret_bytes)?;
        PrivateKey::from_parts(public, secret)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("KeyRecord serialization is infallible")
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| CryptoError::MalformedEncoding(e.to_string()))
    }
}
