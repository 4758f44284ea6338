//! # Curve Layer
//!
//! The fixed group every other module computes in: BN254 G1 points
//! ([`EcPoint`]), scalars modulo its order ([`Scalar`]), and the immutable
//! [`CurveContext`] that prover and verifier must share.
//!
//! Nothing above this module touches arkworks types for arithmetic. If a
//! proof needs an operation that isn't here, add it here first.

pub mod context;
pub mod point;
pub mod scalar;

pub use context::CurveContext;
pub use point::EcPoint;
pub use scalar::{
    random_nonzero_scalar, random_scalar, scalar_from_be_bytes, scalar_from_canonical_bytes,
    scalar_from_i64, scalar_to_bytes, Scalar,
};
