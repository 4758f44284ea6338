// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Veil Ledger: Confidential Transfer Core
//!
//! The cryptography behind a ledger that hides amounts: Pedersen
//! commitments, a two-point ElGamal scheme with a bounded plaintext domain,
//! and Fiat-Shamir sigma proofs that let a transaction show, without
//! revealing the amount, that
//!
//! 1. a ciphertext encrypts the value its commitment commits to,
//! 2. two parties' ciphertexts hold the same value, and
//! 3. spent = sent + returned.
//!
//! Everything runs on BN254 G1 through arkworks. There is one curve, one
//! generator and one set of search bounds; prover and verifier must agree on
//! all of them.
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! - **curve**: points, scalars and the immutable [`CurveContext`].
//! - **crypto**: keys, commitments, encryption, bounded search and message
//!   signatures.
//! - **sigma**: DLP, representation, equality and linear-equation proofs
//!   and the shared Fiat-Shamir transcript.
//! - **transaction**: format, balance and same-value proofs built on the
//!   sigma proofs.
//! - **config**: protocol constants.
//! - **error**: [`CryptoError`] and [`VerificationError`].
//! - **logging**: `tracing` subscriber setup for binaries.
//!
//! ## What this crate does not do
//!
//! No networking, no storage, no transaction envelope. Callers hand in keys
//! and amounts and get back bytes to embed in their own records; later they
//! hand the bytes back and ask whether a proof holds. Every call is
//! synchronous and self-contained, so independent proofs can run on as
//! many threads as you like.
//!
//! ## Example
//!
//! ```
//! use ark_std::rand::{rngs::StdRng, SeedableRng};
//! use veil_ledger::{
//!     decrypt_value, encrypt_value, generate_keys, prove_format, verify_format_proof,
//!     CurveContext,
//! };
//!
//! let ctx = CurveContext::bn254();
//! let mut rng = StdRng::seed_from_u64(1);
//! let (public, private) = generate_keys(&ctx, "alice", &mut rng).unwrap();
//!
//! let (ct, _commitment, r) = encrypt_value(&public, 20, &mut rng).unwrap();
//! assert_eq!(decrypt_value(&private, &ct).unwrap(), 20);
//!
//! let proof = prove_format(&public, 20, &r, &ct, &mut rng).unwrap();
//! assert!(verify_format_proof(&public, 20, &ct, &proof));
//! ```

pub mod config;
pub mod crypto;
pub mod curve;
pub mod error;
pub mod logging;
pub mod sigma;
pub mod transaction;

pub use crypto::{
    commit, commit_bytes, commit_u64, commit_with_raw_randomness, decrypt_message, decrypt_value,
    decrypt_values, encrypt_address, encrypt_message, encrypt_value, generate_keys,
    open_commitment, sign, verify_commitment, verify_signature, Commitment, CypherText, KeyRecord,
    PrivateKey, PublicKey, Signature, WirePublicKey,
};
pub use curve::{CurveContext, EcPoint, Scalar};
pub use error::{CryptoError, Result, VerificationError};
pub use sigma::{DlogProof, EqualityProof, LinearProof, RepresentationProof, ResponseEncoding};
pub use transaction::{
    prove_balance, prove_format, prove_same_address, prove_same_value, verify_balance_proof,
    verify_format_proof, verify_same_value, BalanceCommitments, BalanceProof, FormatProof,
    SameValueProof,
};
