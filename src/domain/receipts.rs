//! Results returned by liquidity operations and pool queries.

use core::fmt;

use super::{Amount, AssetPair, BasisPoints, PoolId, Shares};

/// Outcome of creating a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatePoolReceipt {
    /// Id assigned to the new pool.
    pub pool_id: PoolId,
    /// LP shares minted to the creator.
    pub shares: Shares,
}

/// Outcome of adding liquidity.  Amounts are in canonical `(x, y)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidityReceipt {
    /// Amount of `x` actually deposited.
    pub amount_x: Amount,
    /// Amount of `y` actually deposited.
    pub amount_y: Amount,
    /// LP shares minted.
    pub shares: Shares,
}

/// Outcome of removing liquidity.  Amounts are in canonical `(x, y)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidityReceipt {
    /// Amount of `x` paid out.
    pub amount_x: Amount,
    /// Amount of `y` paid out.
    pub amount_y: Amount,
}

/// Point-in-time copy of a pool's public state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSnapshot {
    /// Pool id.
    pub pool_id: PoolId,
    /// Canonical asset pair.
    pub pair: AssetPair,
    /// Reserve of `pair.x()`.
    pub reserve_x: Amount,
    /// Reserve of `pair.y()`.
    pub reserve_y: Amount,
    /// Outstanding LP shares.
    pub total_shares: Shares,
    /// Swap fee, fixed at creation.
    pub fee: BasisPoints,
    /// Lifetime fee income paid in `x`.
    pub fees_x: Amount,
    /// Lifetime fee income paid in `y`.
    pub fees_y: Amount,
}

impl PoolSnapshot {
    /// Returns `true` once every share has been burned.
    #[must_use]
    pub const fn is_drained(&self) -> bool {
        self.total_shares.is_zero()
    }
}

impl fmt::Display for PoolSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(x={}, y={}, shares={}, fee={})",
            self.pool_id, self.reserve_x, self.reserve_y, self.total_shares, self.fee
        )
    }
}
