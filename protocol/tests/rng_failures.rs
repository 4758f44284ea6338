//! Behaviour under a broken random source.
//!
//! Every prover, key generator and signer draws through `try_fill_bytes`, so
//! a failing RNG must surface as `CryptoError::Randomness` and a stuck RNG
//! must hit a retry cap instead of looping.

use ark_std::rand::{rngs::StdRng, SeedableRng};
use rand_core::{CryptoRng, RngCore};

use veil_ledger::config::{BALANCE_COEFFICIENTS, MAX_BLINDING_ATTEMPTS};
use veil_ledger::curve::{random_scalar, scalar_from_i64};
use veil_ledger::{
    encrypt_value, generate_keys, sign, CryptoError, CurveContext, DlogProof, EcPoint,
    LinearProof, Scalar,
};

// ---------------------------------------------------------------------------
// Test Doubles
// ---------------------------------------------------------------------------

/// An RNG whose every fallible read errors.
struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
        Err(rand_core::Error::new("entropy source unavailable"))
    }
}

impl CryptoRng for FailingRng {}

/// An RNG stuck on zero: reads succeed but every draw is the zero scalar.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        dest.fill(0);
        Ok(())
    }
}

impl CryptoRng for ZeroRng {}

fn is_randomness_failure<T>(result: Result<T, CryptoError>) -> bool {
    matches!(result, Err(CryptoError::Randomness(_)))
}

// ---------------------------------------------------------------------------
// Failing source
// ---------------------------------------------------------------------------

#[test]
fn dlog_prover_propagates_rng_failure() {
    let ctx = CurveContext::bn254();
    let x = Scalar::from(5u64);
    assert!(is_randomness_failure(DlogProof::prove(&ctx, &x, &mut FailingRng)));
}

#[test]
fn key_generation_propagates_rng_failure() {
    let ctx = CurveContext::bn254();
    assert!(is_randomness_failure(generate_keys(&ctx, "alice", &mut FailingRng)));
}

#[test]
fn encryption_propagates_rng_failure() {
    let mut rng = StdRng::seed_from_u64(1);
    let (public, _) = generate_keys(&CurveContext::bn254(), "alice", &mut rng).unwrap();
    assert!(is_randomness_failure(encrypt_value(&public, 70, &mut FailingRng)));
}

#[test]
fn signing_propagates_rng_failure() {
    let mut rng = StdRng::seed_from_u64(2);
    let (_, private) = generate_keys(&CurveContext::bn254(), "alice", &mut rng).unwrap();
    assert!(is_randomness_failure(sign(&private, b"msg", &mut FailingRng)));
}

#[test]
fn failure_message_is_carried_through() {
    let err = random_scalar(&mut FailingRng).unwrap_err();
    assert!(err.to_string().contains("entropy source unavailable"), "{err}");
}

// ---------------------------------------------------------------------------
// Stuck source
// ---------------------------------------------------------------------------

#[test]
fn linear_prover_gives_up_after_the_blinding_cap() {
    let mut rng = StdRng::seed_from_u64(3);
    let bases: Vec<EcPoint> = (0..3)
        .map(|_| EcPoint::generator().scalar_mul(&random_scalar(&mut rng).unwrap()))
        .collect();
    let witnesses = [Scalar::from(100u64), Scalar::from(70u64), Scalar::from(30u64)];
    let coefficients: Vec<Scalar> = BALANCE_COEFFICIENTS
        .iter()
        .map(|a| scalar_from_i64(*a))
        .collect();
    let target = Scalar::from(0u64);

    let result = LinearProof::prove(&bases, &witnesses, &coefficients, &target, &mut ZeroRng);
    assert_eq!(
        result.unwrap_err(),
        CryptoError::BlindingExhausted {
            attempts: MAX_BLINDING_ATTEMPTS
        }
    );
    assert_eq!(MAX_BLINDING_ATTEMPTS, 64);
}

#[test]
fn zero_stuck_source_cannot_produce_keys_or_signatures() {
    let ctx = CurveContext::bn254();
    assert!(is_randomness_failure(generate_keys(&ctx, "alice", &mut ZeroRng)));

    let mut rng = StdRng::seed_from_u64(4);
    let (_, private) = generate_keys(&ctx, "alice", &mut rng).unwrap();
    assert!(is_randomness_failure(sign(&private, b"msg", &mut ZeroRng)));
}
