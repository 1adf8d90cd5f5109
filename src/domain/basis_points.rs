//! Fee rates in basis points.

use core::fmt;

use crate::error::AmmError;

/// Basis-point denominator (10 000 bp = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A fee rate expressed in basis points (1 bp = 0.01%).
///
/// Pools store their swap fee as `BasisPoints`.  A rate of 10 000 bp or
/// more would leave nothing of the input to price, so pricing functions
/// reject it via [`complement`](Self::complement).
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::BasisPoints;
///
/// let fee = BasisPoints::new(30);
/// assert_eq!(fee.complement(), Ok(9_970));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points.
    pub const ZERO: Self = Self(0);

    /// Creates a new `BasisPoints` from a raw `u32`.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `10_000 - self`, the share of an input that is priced.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the rate is 100% or more.
    pub const fn complement(&self) -> Result<u32, AmmError> {
        if self.0 >= BPS_DENOMINATOR {
            return Err(AmmError::InvalidFee("fee must be below 10000 bps"));
        }
        Ok(BPS_DENOMINATOR - self.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
