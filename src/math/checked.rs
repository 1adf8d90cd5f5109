//! `Result`-returning arithmetic on [`Amount`] and [`Shares`].
//!
//! The domain newtypes expose `Option`-returning checked operations.
//! [`CheckedArithmetic`] lifts them into [`AmmError`] so engine code can
//! chain them with `?`.  Error mapping:
//!
//! | Operation | Failure | Error |
//! |-----------|---------|-------|
//! | `safe_add`, `safe_mul` | overflow | [`AmmError::InvalidAmount`] |
//! | `safe_sub` | underflow | [`AmmError::InvariantViolation`] |
//! | `safe_div` | zero divisor | [`AmmError::InsufficientLiquidity`] |
//!
//! Subtraction in the engine only runs after the operands have been
//! validated, so an underflow there is a defect.  Division is only ever
//! by reserves or share totals, so a zero divisor means a drained pool.

use crate::domain::{Amount, Rounding, Shares};
use crate::error::AmmError;

/// Checked arithmetic returning [`AmmError`] instead of `None`.
pub trait CheckedArithmetic: Sized {
    /// Addition; overflow is [`AmmError::InvalidAmount`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] on overflow.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Subtraction; underflow is [`AmmError::InvariantViolation`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvariantViolation`] on underflow.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Multiplication; overflow is [`AmmError::InvalidAmount`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] on overflow.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Division with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::InvalidAmount("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or_else(|| AmmError::invariant("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(other)
            .ok_or(AmmError::InvalidAmount("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        self.checked_div(other, rounding)
            .ok_or(AmmError::InsufficientLiquidity)
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::InvalidAmount("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or_else(|| AmmError::invariant("share subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.get()
            .checked_mul(other.get())
            .map(Shares::new)
            .ok_or(AmmError::InvalidAmount("share multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        self.as_amount()
            .checked_div(&other.as_amount(), rounding)
            .map(|a| Shares::new(a.get()))
            .ok_or(AmmError::InsufficientLiquidity)
    }
}
