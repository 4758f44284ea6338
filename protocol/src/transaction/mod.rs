//! # Transaction Proofs
//!
//! The proofs a confidential transfer actually carries, built by
//! instantiating the generic sigma proofs with transaction-specific bases
//! and witnesses.
//!
//! ## Architecture
//!
//! ```text
//! format.rs      FormatProof: ciphertext encrypts the stated value
//! balance.rs     BalanceProof: spent = sent + returned over three commitments
//! same_value.rs  SameValueProof: two keys' commitments hide one value/address
//! ```
//!
//! ## Flow
//!
//! 1. **Encrypt**: the sender calls `encrypt_value` for every amount and
//!    keeps the randomness.
//! 2. **Prove**: [`prove_format`] per ciphertext, [`prove_balance`] over
//!    the spent/sent/returned commitments, and [`prove_same_value`] where a
//!    second party (regulator, exchange) needs the same amount.
//! 3. **Embed**: the caller writes `to_bytes()` of each proof into
//!    its transaction record.
//! 4. **Verify**: a validator decodes with `from_bytes()` and calls the
//!    matching `verify_*` entry point. Any `false` means reject the
//!    transaction.
//!
//! ## Design Decisions
//!
//! - Each proof is a thin wrapper over one generic proof type, so the sigma
//!   arithmetic exists once while each wrapper keeps its own relation.
//! - Verifiers derive the bases and statements from public data and refuse
//!   proofs that carry different ones, instead of trusting what the proof
//!   claims to be about.
//! - Format, same-value and balance proofs transmit their responses negated
//!   (`ResponseEncoding::Negated`). That is a wire convention only; the
//!   in-memory values are the true responses.
//! - Everything here is a pure function of its inputs plus the prover's RNG.

pub mod balance;
pub mod format;
pub mod same_value;

pub use balance::{prove_balance, verify_balance_proof, BalanceCommitments, BalanceProof};
pub use format::{prove_format, verify_format_proof, FormatProof};
pub use same_value::{prove_same_address, prove_same_value, verify_same_value, SameValueProof};
