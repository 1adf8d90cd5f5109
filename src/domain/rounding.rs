//! Explicit rounding direction for integer division.

/// Direction applied when an integer division leaves a remainder.
///
/// Every division in the engine names its direction.  The convention is
/// to round against the trader: outputs round [`Down`](Self::Down),
/// required inputs round [`Up`](Self::Up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
