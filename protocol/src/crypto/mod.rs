//! # Commitments, Keys and Encryption
//!
//! Everything a transaction author needs before any proof is built:
//!
//! - **keys**: dual-base key pairs derived from a seed string, plus their
//!   wire and export forms.
//! - **commitment**: Pedersen commitments `v·G1 + r·H` and their opening
//!   by bounded search.
//! - **encryption**: the dual-point ElGamal scheme `(v·G1 + r·H, r·G2)`
//!   with bounded-domain decryption.
//! - **search**: the baby-step/giant-step solver both of the above use.
//! - **signature**: ECDSA message signing with the same key pair.
//!
//! ## A note on "decryption"
//!
//! Nothing here is a general-purpose cipher. Plaintexts are recovered by
//! searching a small, fixed domain, because that is all a ledger of token
//! amounts needs and all this construction supports. If you need to move
//! arbitrary data privately, this is the wrong module.

pub mod commitment;
pub mod encryption;
pub mod keys;
pub mod search;
pub mod signature;

pub use commitment::{
    commit, commit_bytes, commit_u64, commit_with_raw_randomness, open_commitment,
    verify_commitment, Commitment,
};
pub use encryption::{
    address_to_value, decrypt_message, decrypt_value, decrypt_values, encrypt_address,
    encrypt_message, encrypt_value, CypherText, ValueDecryptor,
};
pub use keys::{generate_keys, KeyRecord, PrivateKey, PublicKey, WirePublicKey};
pub use search::{bounded_discrete_log, DecryptionTable};
pub use signature::{sign, verify_signature, Signature};
