//! # Protocol Configuration & Constants
//!
//! Every magic number in the confidential-transfer core lives here. If you're
//! hardcoding a bound somewhere else, you're doing it wrong.
//!
//! Most of these values are part of the wire protocol, not tuning knobs. The
//! search bounds in particular decide which plaintexts a verifier or a key
//! holder can ever recover: a prover and a verifier that disagree on them
//! disagree on what a valid transaction is. Change them only together with
//! every deployed counterpart.

// ---------------------------------------------------------------------------
// Curve Parameters
// ---------------------------------------------------------------------------

/// The one curve this crate speaks. BN254 G1, the same group the rest of
/// the arkworks ecosystem (and the EVM precompiles) use.
pub const CURVE_NAME: &str = "BN254-G1";

/// Length of a compressed G1 point on the wire.
pub const POINT_ENCODED_LEN: usize = 32;

/// Length of a scalar on the wire: fixed-width big-endian, sized to the
/// group order.
pub const SCALAR_ENCODED_LEN: usize = 32;

/// Fiat-Shamir challenges are raw SHA-256 digests.
pub const CHALLENGE_LEN: usize = 32;

/// Length of an address accepted by the address adapters. Addresses are
/// reinterpreted as a big-endian `u64`, so only the first 8 bytes count.
pub const ADDRESS_VALUE_LEN: usize = 8;

/// Largest base/response vector a proof may carry: n-ary proofs prefix
/// their vectors with a big-endian `u32` count.
pub const MAX_VECTOR_LEN: usize = u32::MAX as usize;

// ---------------------------------------------------------------------------
// Bounded Search
// ---------------------------------------------------------------------------

/// Upper bound (exclusive) for opening a Pedersen commitment by search.
/// Candidate values are `0..COMMITMENT_SEARCH_BOUND`.
pub const COMMITMENT_SEARCH_BOUND: u64 = 50_000;

/// Upper bound (exclusive) for recovering an encrypted amount. `2^18`
/// candidates, `0..VALUE_DECRYPT_BOUND`. Amounts at or above this cannot be
/// decrypted.
pub const VALUE_DECRYPT_BOUND: u64 = 262_144;

/// Upper bound (exclusive) for the generic byte-message decryption path.
pub const MESSAGE_DECRYPT_BOUND: u64 = 50_000;

// ---------------------------------------------------------------------------
// Proof Parameters
// ---------------------------------------------------------------------------

/// How many times the linear-equation prover may redraw its blinding vector
/// before giving up. A single draw succeeds unless the solved pivot lands on
/// zero, so hitting this limit means the RNG is broken.
pub const MAX_BLINDING_ATTEMPTS: usize = 64;

/// Nonce redraws allowed when a signature comes out with `r = 0` or
/// `s = 0`. Either is negligibly rare with a working RNG.
pub const MAX_SIGNING_ATTEMPTS: usize = 8;

/// Coefficients of the balance relation `-spent + sent + returned = 0`.
pub const BALANCE_COEFFICIENTS: [i64; 3] = [-1, 1, 1];

/// Target of the balance relation.
pub const BALANCE_TARGET: i64 = 0;
