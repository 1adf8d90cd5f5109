//! Single-pool pricing and execution.
//!
//! # Pricing
//!
//! With fee rate `f` in basis points and `c = 10 000 − f`:
//!
//! ```text
//! after_fee  = ⌊amount_in · c / 10 000⌋
//! amount_out = ⌊after_fee · reserve_out / (reserve_in + after_fee)⌋
//! amount_in  = ⌈reserve_in · amount_out · 10 000 / ((reserve_out − amount_out) · c)⌉
//! ```
//!
//! Rounding always favours the pool.  The fee portion of an input is
//! `amount_in − after_fee`; it stays in the reserves and is also added
//! to the pool's lifetime fee counter.

use tracing::debug;

use super::{rejected, Amm};
use crate::domain::{
    AccountId, Amount, AssetId, BasisPoints, HopQuote, PoolId, Rounding, BPS_DENOMINATOR,
};
use crate::error::{AmmError, Result};
use crate::ledger::TransferJournal;
use crate::math::{mul_div, mul_div_wide};
use crate::pools::Pool;
use crate::traits::{AssetLedger, Clock};

const DENOMINATOR: u128 = BPS_DENOMINATOR as u128;

/// Output of selling `amount_in` into a pool with the given reserves.
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | `amount_in` is zero | [`AmmError::InvalidAmount`] |
/// | either reserve is zero | [`AmmError::InsufficientLiquidity`] |
/// | `fee >= 10000` | [`AmmError::InvalidFee`] |
/// | the output rounds to zero | [`AmmError::InvalidAmount`] |
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::{Amount, BasisPoints};
/// use hydra_swap::quote_amount_out;
///
/// let out = quote_amount_out(
///     Amount::new(100),
///     Amount::new(1_000),
///     Amount::new(1_000),
///     BasisPoints::new(30),
/// );
/// assert_eq!(out, Ok(Amount::new(90)));
/// ```
pub fn quote_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: BasisPoints,
) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(AmmError::InvalidAmount("input amount must be non-zero"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let after_fee = amount_after_fee(amount_in, fee)?;
    let denominator = reserve_in
        .get()
        .checked_add(after_fee)
        .ok_or(AmmError::InvalidAmount("input overflows the reserve"))?;
    let amount_out = mul_div(after_fee, reserve_out.get(), denominator, Rounding::Down)
        .ok_or(AmmError::InvalidAmount("output overflow"))?;
    if amount_out == 0 {
        return Err(AmmError::InvalidAmount("input too small to produce output"));
    }
    Ok(Amount::new(amount_out))
}

/// Input required to take exactly `amount_out` from a pool with the
/// given reserves.
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | `amount_out` is zero | [`AmmError::InvalidAmount`] |
/// | `amount_out >= reserve_out` or `reserve_in` is zero | [`AmmError::InsufficientLiquidity`] |
/// | `fee >= 10000` | [`AmmError::InvalidFee`] |
/// | the input does not fit in `u128` | [`AmmError::InvalidAmount`] |
pub fn quote_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: BasisPoints,
) -> Result<Amount> {
    if amount_out.is_zero() {
        return Err(AmmError::InvalidAmount("output amount must be non-zero"));
    }
    if reserve_in.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let complement = u128::from(fee.complement()?);
    let remaining = reserve_out.get() - amount_out.get();
    mul_div_wide(
        &[reserve_in.get(), amount_out.get(), DENOMINATOR],
        &[remaining, complement],
        Rounding::Up,
    )
    .map(Amount::new)
    .ok_or(AmmError::InvalidAmount("required input overflows"))
}

fn amount_after_fee(amount_in: Amount, fee: BasisPoints) -> Result<u128> {
    let complement = u128::from(fee.complement()?);
    mul_div(amount_in.get(), complement, DENOMINATOR, Rounding::Down)
        .ok_or_else(|| AmmError::invariant("fee deduction overflow"))
}

/// Portion of `amount_in` retained as fee.
pub(crate) fn fee_portion(amount_in: Amount, fee: BasisPoints) -> Result<Amount> {
    let after_fee = amount_after_fee(amount_in, fee)?;
    Ok(Amount::new(amount_in.get() - after_fee))
}

/// Quotes selling `amount_in` of `asset_in` into `pool`.
pub(crate) fn hop_out(
    pool: &Pool,
    asset_in: AssetId,
    asset_out: AssetId,
    amount_in: Amount,
) -> Result<HopQuote> {
    let (_, reserve_in, reserve_out) = pool.orient(&asset_in)?;
    let amount_out = quote_amount_out(amount_in, reserve_in, reserve_out, pool.fee())?;
    Ok(HopQuote {
        pool_id: pool.id(),
        asset_in,
        asset_out,
        amount_in,
        amount_out,
        fee: fee_portion(amount_in, pool.fee())?,
    })
}

/// Quotes buying exactly `amount_out` of `asset_out` from `pool`.
pub(crate) fn hop_in(
    pool: &Pool,
    asset_in: AssetId,
    asset_out: AssetId,
    amount_out: Amount,
) -> Result<HopQuote> {
    let (_, reserve_in, reserve_out) = pool.orient(&asset_in)?;
    let amount_in = quote_amount_in(amount_out, reserve_in, reserve_out, pool.fee())?;
    Ok(HopQuote {
        pool_id: pool.id(),
        asset_in,
        asset_out,
        amount_in,
        amount_out,
        fee: fee_portion(amount_in, pool.fee())?,
    })
}

impl<L: AssetLedger, C: Clock> Amm<L, C> {
    /// Sells exactly `amount_in` of `asset_in` into one pool.
    ///
    /// Returns the amount of the pool's other asset paid to `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown pool
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not in the pool
    /// - any [`quote_amount_out`] error
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `amount_out_min`
    /// - [`AmmError::TransferFailed`] if the ledger refuses a transfer
    pub fn swap_exact_in(
        &self,
        caller: AccountId,
        pool_id: PoolId,
        asset_in: AssetId,
        amount_in: Amount,
        amount_out_min: Amount,
    ) -> Result<Amount> {
        self.swap_single(caller, pool_id, asset_in, |pool, asset_out| {
            let hop = hop_out(pool, asset_in, asset_out, amount_in)?;
            if hop.amount_out < amount_out_min {
                return Err(AmmError::SlippageExceeded {
                    amount: hop.amount_out.get(),
                    limit: amount_out_min.get(),
                });
            }
            Ok(hop)
        })
        .map(|hop| hop.amount_out)
        .map_err(rejected("swap_exact_in"))
    }

    /// Buys exactly `amount_out` of the pool's other asset, paying in
    /// `asset_in`.
    ///
    /// Returns the amount of `asset_in` taken from `caller`.
    ///
    /// # Errors
    ///
    /// As [`swap_exact_in`](Self::swap_exact_in), with [`quote_amount_in`]
    /// errors, and [`AmmError::SlippageExceeded`] when the required input
    /// exceeds `amount_in_max`.
    pub fn swap_exact_out(
        &self,
        caller: AccountId,
        pool_id: PoolId,
        asset_in: AssetId,
        amount_out: Amount,
        amount_in_max: Amount,
    ) -> Result<Amount> {
        self.swap_single(caller, pool_id, asset_in, |pool, asset_out| {
            let hop = hop_in(pool, asset_in, asset_out, amount_out)?;
            if hop.amount_in > amount_in_max {
                return Err(AmmError::SlippageExceeded {
                    amount: hop.amount_in.get(),
                    limit: amount_in_max.get(),
                });
            }
            Ok(hop)
        })
        .map(|hop| hop.amount_in)
        .map_err(rejected("swap_exact_out"))
    }

    fn swap_single<F>(
        &self,
        caller: AccountId,
        pool_id: PoolId,
        asset_in: AssetId,
        quote: F,
    ) -> Result<HopQuote>
    where
        F: FnOnce(&Pool, AssetId) -> Result<HopQuote>,
    {
        let mut pool = self.store.lock(pool_id)?;
        let (side_in, _, _) = pool.orient(&asset_in)?;
        let asset_out = pool.pair().asset(side_in.flip());
        let hop = quote(&*pool, asset_out)?;

        let update = pool.stage_swap(side_in, hop.amount_in, hop.amount_out, hop.fee)?;
        let custody = pool.custody();
        let mut journal = TransferJournal::new(&self.ledger);
        journal.transfer(asset_in, caller, custody, hop.amount_in)?;
        journal.transfer(asset_out, custody, caller, hop.amount_out)?;
        pool.commit(update);

        debug!(
            pool = %pool_id,
            caller = %caller,
            amount_in = %hop.amount_in,
            amount_out = %hop.amount_out,
            fee = %hop.fee,
            "swap committed"
        );
        Ok(hop)
    }
}
