//! Constant-product pool record.
//!
//! A [`Pool`] holds the reserves, the LP share ledger and the fee
//! counters of one asset pair.  It never prices anything itself: engines
//! compute amounts, ask the pool to *stage* the resulting state, perform
//! the ledger transfers, and only then [`commit`](Pool::commit) the staged
//! update.  Staging does all fallible arithmetic, so committing cannot
//! fail.
//!
//! # Invariants
//!
//! | Invariant | Enforced by |
//! |-----------|-------------|
//! | reserves and shares are all zero or all non-zero | engines, share math |
//! | `x' · y' >= x · y` across a swap | [`Pool::stage_swap`] |
//! | `total_shares == Σ providers` | every stage adjusts both by the same delta |

use std::collections::HashMap;

use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, BasisPoints, PoolId, PoolSnapshot, Shares, Side,
};
use crate::error::{AmmError, Result};
use crate::math::{constant_product, CheckedArithmetic};

/// State of one pool, guarded by its own mutex in the
/// [`PoolStore`](super::PoolStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Pool {
    id: PoolId,
    pair: AssetPair,
    fee: BasisPoints,
    reserve_x: Amount,
    reserve_y: Amount,
    total_shares: Shares,
    fees_x: Amount,
    fees_y: Amount,
    providers: HashMap<AccountId, Shares>,
}

/// Pool state computed ahead of the transfers that justify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub(crate) struct PoolUpdate {
    reserve_x: Amount,
    reserve_y: Amount,
    total_shares: Shares,
    fees_x: Amount,
    fees_y: Amount,
    provider: Option<(AccountId, Shares)>,
}

impl PoolUpdate {
    pub(crate) const fn total_shares(&self) -> Shares {
        self.total_shares
    }
}

impl Pool {
    /// An empty pool; it holds nothing until a deposit is committed.
    pub(crate) fn new(id: PoolId, pair: AssetPair, fee: BasisPoints) -> Self {
        Self {
            id,
            pair,
            fee,
            reserve_x: Amount::ZERO,
            reserve_y: Amount::ZERO,
            total_shares: Shares::ZERO,
            fees_x: Amount::ZERO,
            fees_y: Amount::ZERO,
            providers: HashMap::new(),
        }
    }

    pub(crate) const fn id(&self) -> PoolId {
        self.id
    }

    pub(crate) const fn pair(&self) -> AssetPair {
        self.pair
    }

    pub(crate) const fn fee(&self) -> BasisPoints {
        self.fee
    }

    pub(crate) const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    pub(crate) const fn reserve(&self, side: Side) -> Amount {
        match side {
            Side::X => self.reserve_x,
            Side::Y => self.reserve_y,
        }
    }

    /// Ledger account holding this pool's reserves.
    pub(crate) fn custody(&self) -> AccountId {
        self.id.custody_account()
    }

    /// Resolves a trade direction: `(side_in, reserve_in, reserve_out)`.
    pub(crate) fn orient(&self, asset_in: &AssetId) -> Result<(Side, Amount, Amount)> {
        let side = self.pair.side_of(asset_in)?;
        Ok((side, self.reserve(side), self.reserve(side.flip())))
    }

    pub(crate) fn shares_of(&self, holder: &AccountId) -> Shares {
        self.providers.get(holder).copied().unwrap_or(Shares::ZERO)
    }

    pub(crate) fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            pool_id: self.id,
            pair: self.pair,
            reserve_x: self.reserve_x,
            reserve_y: self.reserve_y,
            total_shares: self.total_shares,
            fee: self.fee,
            fees_x: self.fees_x,
            fees_y: self.fees_y,
        }
    }

    fn unchanged(&self) -> PoolUpdate {
        PoolUpdate {
            reserve_x: self.reserve_x,
            reserve_y: self.reserve_y,
            total_shares: self.total_shares,
            fees_x: self.fees_x,
            fees_y: self.fees_y,
            provider: None,
        }
    }

    /// Stages a swap paying `amount_in` (of which `fee` is the fee portion)
    /// into `side_in` and taking `amount_out` from the other side.
    ///
    /// Rejects the update with [`AmmError::InvariantViolation`] if the
    /// constant product would decrease.
    pub(crate) fn stage_swap(
        &self,
        side_in: Side,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Result<PoolUpdate> {
        let side_out = side_in.flip();
        let reserve_in = self.reserve(side_in).safe_add(&amount_in)?;
        let reserve_out = self.reserve(side_out).safe_sub(&amount_out)?;

        let mut update = self.unchanged();
        match side_in {
            Side::X => {
                update.reserve_x = reserve_in;
                update.reserve_y = reserve_out;
                update.fees_x = saturating_add(self.fees_x, fee);
            }
            Side::Y => {
                update.reserve_y = reserve_in;
                update.reserve_x = reserve_out;
                update.fees_y = saturating_add(self.fees_y, fee);
            }
        }

        let k_before = constant_product(self.reserve_x.get(), self.reserve_y.get());
        let k_after = constant_product(update.reserve_x.get(), update.reserve_y.get());
        if k_after < k_before {
            return Err(AmmError::invariant("constant product decreased"));
        }
        Ok(update)
    }

    /// Stages a deposit of `(amount_x, amount_y)` minting `minted` shares
    /// to `provider`.
    pub(crate) fn stage_deposit(
        &self,
        provider: AccountId,
        amount_x: Amount,
        amount_y: Amount,
        minted: Shares,
    ) -> Result<PoolUpdate> {
        let balance = self.shares_of(&provider).safe_add(&minted)?;
        let mut update = self.unchanged();
        update.reserve_x = self.reserve_x.safe_add(&amount_x)?;
        update.reserve_y = self.reserve_y.safe_add(&amount_y)?;
        update.total_shares = self.total_shares.safe_add(&minted)?;
        update.provider = Some((provider, balance));
        Ok(update)
    }

    /// Stages a withdrawal of `(amount_x, amount_y)` burning `burned`
    /// shares from `provider`.
    pub(crate) fn stage_withdrawal(
        &self,
        provider: AccountId,
        amount_x: Amount,
        amount_y: Amount,
        burned: Shares,
    ) -> Result<PoolUpdate> {
        let balance = self.shares_of(&provider);
        if balance < burned {
            return Err(AmmError::InsufficientLiquidity);
        }
        let balance = balance.safe_sub(&burned)?;
        let mut update = self.unchanged();
        update.reserve_x = self.reserve_x.safe_sub(&amount_x)?;
        update.reserve_y = self.reserve_y.safe_sub(&amount_y)?;
        update.total_shares = self.total_shares.safe_sub(&burned)?;
        update.provider = Some((provider, balance));
        Ok(update)
    }

    /// Applies a staged update.
    pub(crate) fn commit(&mut self, update: PoolUpdate) {
        self.reserve_x = update.reserve_x;
        self.reserve_y = update.reserve_y;
        self.total_shares = update.total_shares;
        self.fees_x = update.fees_x;
        self.fees_y = update.fees_y;
        if let Some((provider, balance)) = update.provider {
            if balance.is_zero() {
                self.providers.remove(&provider);
            } else {
                self.providers.insert(provider, balance);
            }
        }
    }

    /// Sum of all provider balances.
    #[cfg(test)]
    pub(crate) fn provider_total(&self) -> Shares {
        Shares::new(self.providers.values().map(Shares::get).sum())
    }
}

// Fee counters saturate rather than fail a swap.
const fn saturating_add(a: Amount, b: Amount) -> Amount {
    Amount::new(a.get().saturating_add(b.get()))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const ALICE: AccountId = AccountId::from_bytes([0xa1; 32]);
    const BOB: AccountId = AccountId::from_bytes([0xb0; 32]);

    fn pair() -> AssetPair {
        let Ok(pair) = AssetPair::new(AssetId::from_bytes([1u8; 32]), AssetId::from_bytes([2u8; 32]))
        else {
            panic!("distinct assets");
        };
        pair
    }

    fn seeded(x: u128, y: u128, shares: u128) -> Pool {
        let mut pool = Pool::new(PoolId::new(0), pair(), BasisPoints::new(30));
        let Ok(update) =
            pool.stage_deposit(ALICE, Amount::new(x), Amount::new(y), Shares::new(shares))
        else {
            panic!("expected Ok");
        };
        pool.commit(update);
        pool
    }

    #[test]
    fn new_pool_is_empty() {
        let pool = Pool::new(PoolId::new(3), pair(), BasisPoints::new(30));
        let snap = pool.snapshot();
        assert!(snap.is_drained());
        assert!(snap.reserve_x.is_zero());
        assert_eq!(pool.custody(), PoolId::new(3).custody_account());
    }

    #[test]
    fn staging_does_not_mutate() {
        let pool = seeded(1_000, 1_000, 1_000);
        let before = pool.clone();
        let Ok(_) = pool.stage_swap(Side::X, Amount::new(100), Amount::new(90), Amount::new(1))
        else {
            panic!("expected Ok");
        };
        assert_eq!(pool, before);
    }

    #[test]
    fn swap_commit_moves_reserves_and_fees() {
        let mut pool = seeded(1_000, 1_000, 1_000);
        let Ok(update) = pool.stage_swap(Side::X, Amount::new(100), Amount::new(90), Amount::new(1))
        else {
            panic!("expected Ok");
        };
        pool.commit(update);
        let snap = pool.snapshot();
        assert_eq!(snap.reserve_x, Amount::new(1_100));
        assert_eq!(snap.reserve_y, Amount::new(910));
        assert_eq!(snap.fees_x, Amount::new(1));
        assert!(snap.fees_y.is_zero());
    }

    #[test]
    fn swap_that_shrinks_k_is_rejected() {
        let pool = seeded(1_000, 1_000, 1_000);
        let Err(AmmError::InvariantViolation(_)) =
            pool.stage_swap(Side::Y, Amount::new(100), Amount::new(100), Amount::ZERO)
        else {
            panic!("expected InvariantViolation");
        };
    }

    #[test]
    fn orient_by_asset() {
        let pool = seeded(100, 400, 200);
        let Ok((side, rin, rout)) = pool.orient(&pair().y()) else {
            panic!("expected Ok");
        };
        assert_eq!(side, Side::Y);
        assert_eq!(rin, Amount::new(400));
        assert_eq!(rout, Amount::new(100));
        let Err(AmmError::InvalidAsset(_)) = pool.orient(&AssetId::from_bytes([9u8; 32])) else {
            panic!("expected InvalidAsset");
        };
    }

    #[test]
    fn provider_ledger_tracks_total() {
        let mut pool = seeded(100, 400, 200);
        let Ok(update) =
            pool.stage_deposit(BOB, Amount::new(50), Amount::new(200), Shares::new(100))
        else {
            panic!("expected Ok");
        };
        pool.commit(update);
        assert_eq!(pool.total_shares(), Shares::new(300));
        assert_eq!(pool.provider_total(), pool.total_shares());

        let Ok(update) =
            pool.stage_withdrawal(ALICE, Amount::new(100), Amount::new(400), Shares::new(200))
        else {
            panic!("expected Ok");
        };
        pool.commit(update);
        assert_eq!(pool.shares_of(&ALICE), Shares::ZERO);
        assert_eq!(pool.shares_of(&BOB), Shares::new(100));
        assert_eq!(pool.provider_total(), pool.total_shares());
    }

    #[test]
    fn withdrawal_beyond_balance_rejected() {
        let pool = seeded(100, 400, 200);
        assert_eq!(
            pool.stage_withdrawal(BOB, Amount::new(1), Amount::new(1), Shares::new(1)),
            Err(AmmError::InsufficientLiquidity)
        );
    }
}
