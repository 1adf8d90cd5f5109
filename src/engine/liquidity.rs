//! Pool creation and LP share accounting.
//!
//! # Share math
//!
//! | Situation | Shares minted / amounts returned |
//! |-----------|----------------------------------|
//! | first deposit, or re-seeding a drained pool | `⌊√(x · y)⌋` |
//! | deposit into a live pool | `min(⌊x · T / Rx⌋, ⌊y · T / Ry⌋)` |
//! | burning `s` shares | `⌊s · Rx / T⌋`, `⌊s · Ry / T⌋` |
//!
//! Deposits into a live pool are trimmed to the current reserve ratio:
//! the full `x_desired` is used when the matching `y` fits under
//! `y_desired`, otherwise the full `y_desired` is used.

use tracing::{debug, info};

use super::{rejected, Amm};
use crate::domain::{
    AccountId, AddLiquidityReceipt, Amount, AssetId, AssetPair, BasisPoints, CreatePoolReceipt,
    PoolId, RemoveLiquidityReceipt, Rounding, Shares, Side,
};
use crate::error::{AmmError, Result};
use crate::ledger::TransferJournal;
use crate::math::{isqrt, mul_div};
use crate::pools::Pool;
use crate::traits::{AssetLedger, Clock};

impl<L: AssetLedger, C: Clock> Amm<L, C> {
    /// Creates the pool for `(asset_a, asset_b)` at the configured default
    /// fee, funded by `caller`.
    ///
    /// `amount_a` is deposited in `asset_a` and `amount_b` in `asset_b`,
    /// whichever order the pool stores them in.  The caller receives
    /// `⌊√(amount_a · amount_b)⌋` LP shares.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if the assets are equal
    /// - [`AmmError::InvalidAmount`] if an amount is zero or their product
    ///   overflows `u128`
    /// - [`AmmError::PoolAlreadyExists`] if the pair already has a pool
    /// - [`AmmError::TransferFailed`] if the caller cannot fund the pool
    pub fn create_pool(
        &self,
        caller: AccountId,
        asset_a: AssetId,
        asset_b: AssetId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<CreatePoolReceipt> {
        self.create_pool_with_fee(
            caller,
            asset_a,
            asset_b,
            amount_a,
            amount_b,
            self.config.default_fee(),
        )
    }

    /// Like [`create_pool`](Self::create_pool) with an explicit fee, fixed
    /// for the life of the pool.
    ///
    /// # Errors
    ///
    /// As [`create_pool`](Self::create_pool), plus [`AmmError::InvalidFee`]
    /// if `fee` exceeds the configured maximum.
    pub fn create_pool_with_fee(
        &self,
        caller: AccountId,
        asset_a: AssetId,
        asset_b: AssetId,
        amount_a: Amount,
        amount_b: Amount,
        fee: BasisPoints,
    ) -> Result<CreatePoolReceipt> {
        self.try_create_pool(caller, asset_a, asset_b, amount_a, amount_b, fee)
            .map_err(rejected("create_pool"))
    }

    fn try_create_pool(
        &self,
        caller: AccountId,
        asset_a: AssetId,
        asset_b: AssetId,
        amount_a: Amount,
        amount_b: Amount,
        fee: BasisPoints,
    ) -> Result<CreatePoolReceipt> {
        let pair = AssetPair::new(asset_a, asset_b)?;
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InvalidAmount("initial deposit must be non-zero"));
        }
        self.config.check_fee(fee)?;

        let (amount_x, amount_y) = if pair.x() == asset_a {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        let shares = initial_shares(amount_x, amount_y)?;

        let pool_id = self.store.insert_with(pair, |id| {
            let mut pool = Pool::new(id, pair, fee);
            let update = pool.stage_deposit(caller, amount_x, amount_y, shares)?;
            let custody = pool.custody();
            let mut journal = TransferJournal::new(&self.ledger);
            journal.transfer(pair.x(), caller, custody, amount_x)?;
            journal.transfer(pair.y(), caller, custody, amount_y)?;
            pool.commit(update);
            Ok(pool)
        })?;

        info!(
            pool = %pool_id,
            x = %pair.x(),
            y = %pair.y(),
            reserve_x = %amount_x,
            reserve_y = %amount_y,
            shares = %shares,
            fee = %fee,
            "pool created"
        );
        Ok(CreatePoolReceipt { pool_id, shares })
    }

    /// Deposits both assets into a pool at its current ratio and mints LP
    /// shares to `caller`.
    ///
    /// Amounts are in the pool's canonical `(x, y)` order (see
    /// [`PoolSnapshot::pair`](crate::domain::PoolSnapshot::pair)).  A
    /// drained pool is re-seeded with the desired amounts as given.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown pool
    /// - [`AmmError::InvalidAmount`] if a desired amount is zero
    /// - [`AmmError::SlippageExceeded`] if a used amount is below its
    ///   minimum
    /// - [`AmmError::InsufficientLiquidity`] if the deposit mints no shares
    /// - [`AmmError::TransferFailed`] if the caller cannot fund the deposit
    pub fn add_liquidity(
        &self,
        caller: AccountId,
        pool_id: PoolId,
        amount_x_desired: Amount,
        amount_y_desired: Amount,
        amount_x_min: Amount,
        amount_y_min: Amount,
    ) -> Result<AddLiquidityReceipt> {
        self.try_add_liquidity(
            caller,
            pool_id,
            (amount_x_desired, amount_y_desired),
            (amount_x_min, amount_y_min),
        )
        .map_err(rejected("add_liquidity"))
    }

    fn try_add_liquidity(
        &self,
        caller: AccountId,
        pool_id: PoolId,
        desired: (Amount, Amount),
        min: (Amount, Amount),
    ) -> Result<AddLiquidityReceipt> {
        if desired.0.is_zero() || desired.1.is_zero() {
            return Err(AmmError::InvalidAmount("desired amounts must be non-zero"));
        }

        let mut pool = self.store.lock(pool_id)?;
        let total = pool.total_shares();
        let (amount_x, amount_y, shares) = if total.is_zero() {
            (desired.0, desired.1, initial_shares(desired.0, desired.1)?)
        } else {
            let reserve_x = pool.reserve(Side::X);
            let reserve_y = pool.reserve(Side::Y);
            let (amount_x, amount_y) = optimal_deposit(desired, reserve_x, reserve_y)?;
            let shares = ratio(amount_x, total.get(), reserve_x)
                .min(ratio(amount_y, total.get(), reserve_y));
            (amount_x, amount_y, Shares::new(shares))
        };

        check_min(amount_x, min.0)?;
        check_min(amount_y, min.1)?;
        if shares.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        let update = pool.stage_deposit(caller, amount_x, amount_y, shares)?;
        let pair = pool.pair();
        let custody = pool.custody();
        let mut journal = TransferJournal::new(&self.ledger);
        journal.transfer(pair.x(), caller, custody, amount_x)?;
        journal.transfer(pair.y(), caller, custody, amount_y)?;
        pool.commit(update);

        debug!(
            pool = %pool_id,
            provider = %caller,
            amount_x = %amount_x,
            amount_y = %amount_y,
            shares = %shares,
            reseeded = total.is_zero(),
            "liquidity added"
        );
        Ok(AddLiquidityReceipt {
            amount_x,
            amount_y,
            shares,
        })
    }

    /// Burns `shares` of `caller`'s LP balance and pays out the
    /// proportional reserves.
    ///
    /// Burning every outstanding share leaves the pool drained at
    /// `(0, 0, 0)`; it stays registered and can be re-seeded with
    /// [`add_liquidity`](Self::add_liquidity).
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown pool
    /// - [`AmmError::InvalidAmount`] if `shares` is zero
    /// - [`AmmError::InsufficientLiquidity`] if `caller` holds fewer
    ///   shares, or either payout rounds to zero
    /// - [`AmmError::SlippageExceeded`] if a payout is below its minimum
    /// - [`AmmError::TransferFailed`] if the ledger refuses a payout
    pub fn remove_liquidity(
        &self,
        caller: AccountId,
        pool_id: PoolId,
        shares: Shares,
        amount_x_min: Amount,
        amount_y_min: Amount,
    ) -> Result<RemoveLiquidityReceipt> {
        self.try_remove_liquidity(caller, pool_id, shares, (amount_x_min, amount_y_min))
            .map_err(rejected("remove_liquidity"))
    }

    fn try_remove_liquidity(
        &self,
        caller: AccountId,
        pool_id: PoolId,
        shares: Shares,
        min: (Amount, Amount),
    ) -> Result<RemoveLiquidityReceipt> {
        if shares.is_zero() {
            return Err(AmmError::InvalidAmount("shares to burn must be non-zero"));
        }

        let mut pool = self.store.lock(pool_id)?;
        if pool.shares_of(&caller) < shares {
            return Err(AmmError::InsufficientLiquidity);
        }
        let total = pool.total_shares();
        let amount_x = pro_rata(shares, pool.reserve(Side::X), total)?;
        let amount_y = pro_rata(shares, pool.reserve(Side::Y), total)?;
        if amount_x.is_zero() || amount_y.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        check_min(amount_x, min.0)?;
        check_min(amount_y, min.1)?;

        let update = pool.stage_withdrawal(caller, amount_x, amount_y, shares)?;
        let pair = pool.pair();
        let custody = pool.custody();
        let mut journal = TransferJournal::new(&self.ledger);
        journal.transfer(pair.x(), custody, caller, amount_x)?;
        journal.transfer(pair.y(), custody, caller, amount_y)?;
        pool.commit(update);

        debug!(
            pool = %pool_id,
            provider = %caller,
            amount_x = %amount_x,
            amount_y = %amount_y,
            shares = %shares,
            drained = update.total_shares().is_zero(),
            "liquidity removed"
        );
        Ok(RemoveLiquidityReceipt { amount_x, amount_y })
    }
}

/// `⌊√(x · y)⌋`, the shares minted by a first deposit.
fn initial_shares(amount_x: Amount, amount_y: Amount) -> Result<Shares> {
    let product = amount_x
        .get()
        .checked_mul(amount_y.get())
        .ok_or(AmmError::InvalidAmount("deposit product overflows"))?;
    let shares = isqrt(product);
    if shares == 0 {
        return Err(AmmError::InvalidAmount("deposit mints no shares"));
    }
    Ok(Shares::new(shares))
}

fn optimal_deposit(
    desired: (Amount, Amount),
    reserve_x: Amount,
    reserve_y: Amount,
) -> Result<(Amount, Amount)> {
    let (x_desired, y_desired) = desired;
    let y_optimal = scale(x_desired, reserve_y, reserve_x)?;
    if y_optimal <= y_desired {
        return Ok((x_desired, y_optimal));
    }
    let x_optimal = scale(y_desired, reserve_x, reserve_y)?;
    Ok((x_optimal, y_desired))
}

/// `⌊amount · numerator / denominator⌋`.
fn scale(amount: Amount, numerator: Amount, denominator: Amount) -> Result<Amount> {
    mul_div(amount.get(), numerator.get(), denominator.get(), Rounding::Down)
        .map(Amount::new)
        .ok_or(AmmError::InvalidAmount("deposit overflows"))
}

/// Shares matching `amount` of a reserve; saturates so the `min` with
/// the other side decides.
fn ratio(amount: Amount, total: u128, reserve: Amount) -> u128 {
    mul_div(amount.get(), total, reserve.get(), Rounding::Down).unwrap_or(u128::MAX)
}

fn pro_rata(shares: Shares, reserve: Amount, total: Shares) -> Result<Amount> {
    mul_div(shares.get(), reserve.get(), total.get(), Rounding::Down)
        .map(Amount::new)
        .ok_or_else(|| AmmError::invariant("payout exceeds reserve"))
}

fn check_min(amount: Amount, min: Amount) -> Result<()> {
    if amount < min {
        return Err(AmmError::SlippageExceeded {
            amount: amount.get(),
            limit: min.get(),
        });
    }
    Ok(())
}
