//! The process-wide curve parameters, as a value.
//!
//! A [`CurveContext`] is built once and passed by reference into every
//! operation. It is `Copy` and immutable; there is no global to reassign
//! halfway through a test run.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};

use super::point::EcPoint;
use super::scalar::Scalar;
use crate::config::{CURVE_NAME, SCALAR_ENCODED_LEN};

/// Group parameters shared by prover and verifier.
///
/// # Examples
///
/// ```
/// use veil_ledger::curve::CurveContext;
///
/// let ctx = CurveContext::bn254();
/// assert_eq!(ctx, CurveContext::default());
/// assert_eq!(ctx.curve_name(), "BN254-G1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveContext {
    generator: EcPoint,
}

impl CurveContext {
    /// The BN254 G1 context with its standard generator.
    pub fn bn254() -> Self {
        Self {
            generator: EcPoint::generator(),
        }
    }

    /// Base generator `G`.
    pub fn generator(&self) -> EcPoint {
        self.generator
    }

    /// `G * k`.
    pub fn mul_generator(&self, k: &Scalar) -> EcPoint {
        self.generator.scalar_mul(k)
    }

    /// The prime group order, big-endian.
    pub fn order_bytes(&self) -> [u8; SCALAR_ENCODED_LEN] {
        let be = Fr::MODULUS.to_bytes_be();
        let mut out = [0u8; SCALAR_ENCODED_LEN];
        out[SCALAR_ENCODED_LEN - be.len()..].copy_from_slice(&be);
        out
    }

    /// The group order in decimal, for logs and key records.
    pub fn order_decimal(&self) -> String {
        Fr::MODULUS.to_string()
    }

    pub fn curve_name(&self) -> &'static str {
        CURVE_NAME
    }
}

impl Default for CurveContext {
    fn default() -> Self {
        Self::bn254()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::Zero;

    const BN254_R: &str =
        "21888242871839275222246405745257275088548364400416034343698204186575808495617";

    #[test]
    fn order_is_bn254_scalar_modulus() {
        let ctx = CurveContext::bn254();
        assert_eq!(ctx.order_decimal(), BN254_R);
        // 0x30644e72...
        assert_eq!(ctx.order_bytes()[0], 0x30);
        assert_eq!(ctx.order_bytes()[1], 0x64);
    }

    #[test]
    fn generator_has_group_order() {
        let ctx = CurveContext::bn254();
        // r * G == O, i.e. (r - 1) * G == -G
        let minus_one = -Fr::from(1u64);
        assert_eq!(ctx.mul_generator(&minus_one), ctx.generator().negate());
        assert!(ctx.mul_generator(&Fr::zero()).is_identity());
    }

    #[test]
    fn contexts_agree() {
        assert_eq!(CurveContext::bn254(), CurveContext::default());
    }
}
