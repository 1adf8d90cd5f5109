//! Multi-hop routing.
//!
//! A route call runs in two phases:
//!
//! 1. **Quote**: each hop is priced against a snapshot of its pool, taken
//!    under a short lock, and the caller's bound is checked.  Nothing is
//!    held across hops.
//! 2. **Commit**: every pool on the route is locked in ascending
//!    [`PoolId`] order and each hop is priced again.  If any hop no longer
//!    matches its quote the call fails with [`AmmError::StaleQuote`].
//!    Otherwise the staged states are checked, the transfers run through
//!    the rollback journal, and all pools are updated together.
//!
//! Assets flow caller → pool 0 → pool 1 → … → caller; each pool pays its
//! output straight into the custody account of the next.

use tracing::debug;

use super::swap::{hop_in, hop_out};
use super::{rejected, Amm};
use crate::domain::{AccountId, Amount, AssetPair, HopQuote, PoolId, RouteQuote, SwapPath};
use crate::error::{AmmError, Result};
use crate::ledger::TransferJournal;
use crate::pools::PoolGuard;
use crate::traits::{AssetLedger, Clock};

impl<L: AssetLedger, C: Clock> Amm<L, C> {
    /// Resolves each consecutive pair of `path` to its pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if the path is longer than the
    ///   configured `max_hops`
    /// - [`AmmError::PoolNotFound`] if some pair has no pool
    pub fn find_pools(&self, path: &SwapPath) -> Result<Vec<PoolId>> {
        if path.hops() > self.config.max_hops {
            return Err(AmmError::InvalidPath("path exceeds the hop limit"));
        }
        path.pairs()
            .map(|(a, b)| self.store.lookup(&AssetPair::new(a, b)?))
            .collect()
    }

    /// Prices selling `amount_in` of the first asset along `path`.
    ///
    /// # Errors
    ///
    /// Any [`find_pools`](Self::find_pools) error, or the first
    /// [`quote_amount_out`](super::quote_amount_out) error along the route.
    pub fn get_amounts_out(&self, path: &SwapPath, amount_in: Amount) -> Result<RouteQuote> {
        let pools = self.find_pools(path)?;
        let mut hops = Vec::with_capacity(pools.len());
        let mut amount = amount_in;
        for ((asset_in, asset_out), pool_id) in path.pairs().zip(pools) {
            let hop = hop_out(&*self.store.lock(pool_id)?, asset_in, asset_out, amount)?;
            amount = hop.amount_out;
            hops.push(hop);
        }
        Ok(RouteQuote::new(hops))
    }

    /// Prices buying exactly `amount_out` of the last asset along `path`.
    /// Hops are priced from the last pool backward.
    ///
    /// # Errors
    ///
    /// Any [`find_pools`](Self::find_pools) error, or the first
    /// [`quote_amount_in`](super::quote_amount_in) error along the route.
    pub fn get_amounts_in(&self, path: &SwapPath, amount_out: Amount) -> Result<RouteQuote> {
        let pools = self.find_pools(path)?;
        let mut hops = Vec::with_capacity(pools.len());
        let mut amount = amount_out;
        for ((asset_in, asset_out), pool_id) in path.pairs().rev().zip(pools.into_iter().rev()) {
            let hop = hop_in(&*self.store.lock(pool_id)?, asset_in, asset_out, amount)?;
            amount = hop.amount_in;
            hops.push(hop);
        }
        hops.reverse();
        Ok(RouteQuote::new(hops))
    }

    /// Sells exactly `amount_in` of the first asset of `path` for as much
    /// of the last asset as the route yields.
    ///
    /// Returns the amount paid to `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DeadlineExpired`] if the clock is past `deadline`
    /// - any [`get_amounts_out`](Self::get_amounts_out) error
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `amount_out_min`
    /// - [`AmmError::StaleQuote`] if a pool moved between quote and commit
    /// - [`AmmError::TransferFailed`] if the ledger refuses a transfer
    pub fn swap_exact_tokens_for_tokens(
        &self,
        caller: AccountId,
        path: &SwapPath,
        amount_in: Amount,
        amount_out_min: Amount,
        deadline: u64,
    ) -> Result<Amount> {
        self.try_swap_exact_tokens_for_tokens(caller, path, amount_in, amount_out_min, deadline)
            .map_err(rejected("swap_exact_tokens_for_tokens"))
    }

    fn try_swap_exact_tokens_for_tokens(
        &self,
        caller: AccountId,
        path: &SwapPath,
        amount_in: Amount,
        amount_out_min: Amount,
        deadline: u64,
    ) -> Result<Amount> {
        self.check_deadline(deadline)?;
        let quote = self.get_amounts_out(path, amount_in)?;
        if quote.amount_out() < amount_out_min {
            return Err(AmmError::SlippageExceeded {
                amount: quote.amount_out().get(),
                limit: amount_out_min.get(),
            });
        }

        self.commit_exact_in(caller, &quote)
    }

    /// Buys exactly `amount_out` of the last asset of `path`, paying as
    /// little of the first asset as the route requires.
    ///
    /// Returns the amount taken from `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DeadlineExpired`] if the clock is past `deadline`
    /// - any [`get_amounts_in`](Self::get_amounts_in) error
    /// - [`AmmError::SlippageExceeded`] if the required input exceeds
    ///   `amount_in_max`
    /// - [`AmmError::StaleQuote`] if a pool moved between quote and commit
    /// - [`AmmError::TransferFailed`] if the ledger refuses a transfer
    pub fn swap_tokens_for_exact_tokens(
        &self,
        caller: AccountId,
        path: &SwapPath,
        amount_out: Amount,
        amount_in_max: Amount,
        deadline: u64,
    ) -> Result<Amount> {
        self.try_swap_tokens_for_exact_tokens(caller, path, amount_out, amount_in_max, deadline)
            .map_err(rejected("swap_tokens_for_exact_tokens"))
    }

    fn try_swap_tokens_for_exact_tokens(
        &self,
        caller: AccountId,
        path: &SwapPath,
        amount_out: Amount,
        amount_in_max: Amount,
        deadline: u64,
    ) -> Result<Amount> {
        self.check_deadline(deadline)?;
        let quote = self.get_amounts_in(path, amount_out)?;
        if quote.amount_in() > amount_in_max {
            return Err(AmmError::SlippageExceeded {
                amount: quote.amount_in().get(),
                limit: amount_in_max.get(),
            });
        }

        self.commit_exact_out(caller, &quote)
    }

    /// Re-prices an exact-input route under its locks and executes it.
    fn commit_exact_in(&self, caller: AccountId, quote: &RouteQuote) -> Result<Amount> {
        let mut guards = self.lock_route(quote)?;
        let mut hops = Vec::with_capacity(guards.len());
        let mut amount = quote.amount_in();
        for (index, (pool, quoted)) in guards.iter().zip(quote.hops()).enumerate() {
            let hop = hop_out(pool, quoted.asset_in, quoted.asset_out, amount)?;
            if hop.amount_out != quoted.amount_out {
                return Err(AmmError::StaleQuote {
                    hop: index,
                    quoted: quoted.amount_out.get(),
                    actual: hop.amount_out.get(),
                });
            }
            amount = hop.amount_out;
            hops.push(hop);
        }

        self.execute_route(caller, &mut guards, &hops)?;
        Ok(amount)
    }

    /// Re-prices an exact-output route backward under its locks and
    /// executes it.
    fn commit_exact_out(&self, caller: AccountId, quote: &RouteQuote) -> Result<Amount> {
        let mut guards = self.lock_route(quote)?;
        let mut hops = Vec::with_capacity(guards.len());
        let mut amount = quote.amount_out();
        for (index, (pool, quoted)) in guards.iter().zip(quote.hops()).enumerate().rev() {
            let hop = hop_in(pool, quoted.asset_in, quoted.asset_out, amount)?;
            if hop.amount_in != quoted.amount_in {
                return Err(AmmError::StaleQuote {
                    hop: index,
                    quoted: quoted.amount_in.get(),
                    actual: hop.amount_in.get(),
                });
            }
            amount = hop.amount_in;
            hops.push(hop);
        }
        hops.reverse();

        self.execute_route(caller, &mut guards, &hops)?;
        Ok(amount)
    }

    fn check_deadline(&self, deadline: u64) -> Result<()> {
        let now = self.clock.now();
        if now > deadline {
            return Err(AmmError::DeadlineExpired { deadline, now });
        }
        Ok(())
    }

    fn lock_route(&self, quote: &RouteQuote) -> Result<Vec<PoolGuard>> {
        let ids: Vec<PoolId> = quote.hops().iter().map(|hop| hop.pool_id).collect();
        self.store.lock_many(&ids)
    }

    /// Stages, transfers and commits a fully re-quoted route.  `guards`
    /// and `hops` are in trade order.
    fn execute_route(
        &self,
        caller: AccountId,
        guards: &mut [PoolGuard],
        hops: &[HopQuote],
    ) -> Result<()> {
        if guards.len() != hops.len() {
            return Err(AmmError::invariant("route hops and pools differ in length"));
        }
        let Some(first) = hops.first() else {
            return Err(AmmError::invariant("empty route"));
        };

        let updates = guards
            .iter()
            .zip(hops)
            .map(|(pool, hop)| {
                let side_in = pool.pair().side_of(&hop.asset_in)?;
                pool.stage_swap(side_in, hop.amount_in, hop.amount_out, hop.fee)
            })
            .collect::<Result<Vec<_>>>()?;

        let custodies: Vec<AccountId> = guards.iter().map(|pool| pool.custody()).collect();
        let mut journal = TransferJournal::new(&self.ledger);
        journal.transfer(first.asset_in, caller, custodies[0], first.amount_in)?;
        for (index, hop) in hops.iter().enumerate() {
            let recipient = custodies.get(index + 1).copied().unwrap_or(caller);
            journal.transfer(hop.asset_out, custodies[index], recipient, hop.amount_out)?;
        }

        for (pool, update) in guards.iter_mut().zip(updates) {
            pool.commit(update);
        }

        for hop in hops {
            debug!(
                pool = %hop.pool_id,
                caller = %caller,
                amount_in = %hop.amount_in,
                amount_out = %hop.amount_out,
                fee = %hop.fee,
                "route hop committed"
            );
        }
        Ok(())
    }
}
