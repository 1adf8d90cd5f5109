//! `u128` division with an explicit rounding direction.

use crate::domain::Rounding;

/// Divides `numerator` by `denominator`, rounding as requested.
///
/// Returns `None` if `denominator` is zero.  Ceiling division does not
/// overflow for any input.
///
/// ```
/// use hydra_swap::domain::Rounding;
/// use hydra_swap::math::div_round;
///
/// assert_eq!(div_round(7, 2, Rounding::Down), Some(3));
/// assert_eq!(div_round(7, 2, Rounding::Up), Some(4));
/// assert_eq!(div_round(7, 0, Rounding::Up), None);
/// ```
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let quotient = numerator / denominator;
    match rounding {
        Rounding::Down => Some(quotient),
        Rounding::Up => {
            // quotient < u128::MAX whenever a remainder exists
            if numerator % denominator != 0 {
                Some(quotient + 1)
            } else {
                Some(quotient)
            }
        }
    }
}
