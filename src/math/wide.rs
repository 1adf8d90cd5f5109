//! Products and ratios evaluated without intermediate overflow.
//!
//! Reserves are `u128`, so a product of two of them needs up to 256 bits.
//! These helpers evaluate such expressions exactly with [`BigUint`] and
//! only fail when the final result does not fit in `u128`.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::domain::Rounding;

/// Evaluates `Π numerators / Π denominators` with explicit rounding.
///
/// Returns `None` if the denominator product is zero or the result does
/// not fit in `u128`.
///
/// ```
/// use hydra_swap::domain::Rounding;
/// use hydra_swap::math::mul_div_wide;
///
/// // (2^100 * 2^100) / 2^90 would overflow a u128 intermediate.
/// let big = 1u128 << 100;
/// assert_eq!(mul_div_wide(&[big, big], &[1 << 90], Rounding::Down), Some(1 << 110));
/// ```
#[must_use]
pub fn mul_div_wide(numerators: &[u128], denominators: &[u128], rounding: Rounding) -> Option<u128> {
    let numerator = product(numerators);
    let denominator = product(denominators);
    if denominator.is_zero() {
        return None;
    }
    let mut quotient = &numerator / &denominator;
    if rounding.is_up() && !(&numerator % &denominator).is_zero() {
        quotient += 1u32;
    }
    quotient.to_u128()
}

/// Evaluates `a * b / c` with explicit rounding.
#[must_use]
pub fn mul_div(a: u128, b: u128, c: u128, rounding: Rounding) -> Option<u128> {
    mul_div_wide(&[a, b], &[c], rounding)
}

/// The constant product `x * y` as an arbitrary-precision integer.
#[must_use]
pub fn constant_product(x: u128, y: u128) -> BigUint {
    BigUint::from(x) * BigUint::from(y)
}

fn product(factors: &[u128]) -> BigUint {
    factors
        .iter()
        .fold(BigUint::from(1u32), |acc, f| acc * BigUint::from(*f))
}
