//! Error types for the confidential-transfer core.
//!
//! Every fallible operation returns a [`CryptoError`]. Proof verification
//! failures are a separate [`VerificationError`] so callers that only care
//! about accept/reject can match on one variant, while diagnostics can still
//! tell a bad challenge from a bad response.
//!
//! None of these are retried internally. A failure is final for that call.

use thiserror::Error;

/// Why a proof was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    /// The recomputed Fiat-Shamir challenge differs from the one in the proof.
    #[error("challenge mismatch")]
    ChallengeMismatch,

    /// The announcement recomputed from the responses does not match.
    #[error("response mismatch at announcement {index}")]
    ResponseMismatch {
        /// Which announcement failed (0 for single-announcement proofs).
        index: usize,
    },

    /// `Σ a_i·s_i ≠ −c·b` for a linear-equation proof.
    #[error("linear combination of responses does not match the target")]
    LinearCombinationMismatch,

    /// The bases or statements embedded in the proof are not the ones the
    /// verifier derived from public data.
    #[error("proof statement does not match the public inputs")]
    StatementMismatch,

    /// An ECDSA signature does not verify for the message and key.
    #[error("signature does not verify")]
    SignatureMismatch,
}

/// Errors produced by key handling, commitments, encryption and proofs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Malformed or off-curve point encoding.
    #[error("invalid point encoding: {0}")]
    InvalidPoint(String),

    /// Malformed or non-canonical scalar encoding.
    #[error("invalid scalar encoding: {0}")]
    InvalidScalar(String),

    /// A record has the wrong length, trailing bytes or unparseable text,
    /// independent of the points and scalars inside it.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// Base, witness and coefficient vectors disagree in length.
    #[error("arity mismatch: expected {expected} elements, got {actual}")]
    ArityMismatch {
        /// Number of bases.
        expected: usize,
        /// Length of the offending vector.
        actual: usize,
    },

    /// A representation or linear proof was requested over zero bases.
    #[error("statement has no bases")]
    EmptyStatement,

    /// A bounded search finished without a match.
    #[error("no value found below search bound {bound}")]
    OutOfRange {
        /// The exclusive bound that was exhausted.
        bound: u64,
    },

    /// The system random source failed. Fatal for the current operation.
    #[error("random source failure: {0}")]
    Randomness(String),

    /// The linear-equation prover could not draw a usable blinding vector.
    #[error("blinding vector sampling exhausted after {attempts} attempts")]
    BlindingExhausted {
        /// Number of draws made before giving up.
        attempts: usize,
    },

    /// The key-derivation seed reduces to the zero scalar.
    #[error("seed reduces to a zero secret scalar")]
    DegenerateSeed,

    /// A wire key record names a group order other than this curve's.
    #[error("group order does not match the curve context")]
    OrderMismatch,

    /// A private scalar does not reproduce the public key it came with.
    #[error("private key does not match its public key")]
    KeyMismatch,

    /// A proof failed verification.
    #[error("verification failed: {0}")]
    Verification(#[from] VerificationError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_errors_are_distinguishable() {
        let errs = [
            VerificationError::ChallengeMismatch,
            VerificationError::ResponseMismatch { index: 0 },
            VerificationError::ResponseMismatch { index: 1 },
            VerificationError::LinearCombinationMismatch,
            VerificationError::StatementMismatch,
            VerificationError::SignatureMismatch,
        ];
        for (i, a) in errs.iter().enumerate() {
            for (j, b) in errs.iter().enumerate() {
                assert_eq!(i == j, a == b);
            }
        }
    }

    #[test]
    fn verification_error_converts_into_crypto_error() {
        let err: CryptoError = VerificationError::ChallengeMismatch.into();
        assert_eq!(
            err,
            CryptoError::Verification(VerificationError::ChallengeMismatch)
        );
        assert_eq!(err.to_string(), "verification failed: challenge mismatch");
    }

    #[test]
    fn malformed_encoding_is_not_a_point_error() {
        let err = CryptoError::MalformedEncoding("3 trailing bytes after proof".into());
        assert!(!matches!(err, CryptoError::InvalidPoint(_)));
        assert_eq!(
            err.to_string(),
            "malformed encoding: 3 trailing bytes after proof"
        );
    }

    #[test]
    fn out_of_range_message_names_the_bound() {
        let err = CryptoError::OutOfRange { bound: 262_144 };
        assert!(err.to_string().contains("262144"));
    }
}
