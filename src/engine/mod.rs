//! The coordinating service.
//!
//! [`Amm`] owns the pool store, the asset ledger handle, the clock and
//! the configuration.  Every operation is a `&self` method, so one `Amm`
//! can be shared across threads (it is `Send + Sync` whenever its ledger
//! and clock are).
//!
//! | Submodule | Operations |
//! |-----------|------------|
//! | `liquidity` | [`create_pool`](Amm::create_pool), [`create_pool_with_fee`](Amm::create_pool_with_fee), [`add_liquidity`](Amm::add_liquidity), [`remove_liquidity`](Amm::remove_liquidity) |
//! | `swap` | [`quote_amount_out`], [`quote_amount_in`], [`swap_exact_in`](Amm::swap_exact_in), [`swap_exact_out`](Amm::swap_exact_out) |
//! | `router` | [`find_pools`](Amm::find_pools), [`get_amounts_out`](Amm::get_amounts_out), [`get_amounts_in`](Amm::get_amounts_in), [`swap_exact_tokens_for_tokens`](Amm::swap_exact_tokens_for_tokens), [`swap_tokens_for_exact_tokens`](Amm::swap_tokens_for_exact_tokens) |
//!
//! Every mutating call follows the same sequence: validate, quote, stage
//! the new pool state, run the ledger transfers through a rollback
//! journal, then commit.  A call either commits in full or changes
//! nothing.

mod liquidity;
mod router;
mod swap;

#[cfg(test)]
mod proptest_properties;

pub use swap::{quote_amount_in, quote_amount_out};

use tracing::debug;

use crate::config::AmmConfig;
use crate::domain::{AccountId, AssetId, AssetPair, PoolId, PoolSnapshot, Shares};
use crate::error::{AmmError, Result};
use crate::pools::PoolStore;
use crate::traits::{AssetLedger, Clock, SystemClock};

/// Constant-product AMM with a multi-hop router.
///
/// # Examples
///
/// ```
/// use hydra_swap::config::AmmConfig;
/// use hydra_swap::domain::{AccountId, Amount, AssetId};
/// use hydra_swap::ledger::InMemoryLedger;
/// use hydra_swap::traits::ManualClock;
/// use hydra_swap::Amm;
///
/// let usd = AssetId::from_bytes([1u8; 32]);
/// let eur = AssetId::from_bytes([2u8; 32]);
/// let alice = AccountId::from_bytes([0xa1; 32]);
///
/// let ledger = InMemoryLedger::new();
/// let Ok(()) = ledger.mint(usd, alice, Amount::new(1_000)) else { panic!() };
/// let Ok(()) = ledger.mint(eur, alice, Amount::new(1_000)) else { panic!() };
///
/// let Ok(amm) = Amm::new(AmmConfig::default(), ledger, ManualClock::new(0)) else {
///     panic!()
/// };
/// let Ok(receipt) = amm.create_pool(alice, usd, eur, Amount::new(100), Amount::new(400)) else {
///     panic!()
/// };
/// assert_eq!(receipt.shares.get(), 200);
/// ```
#[derive(Debug)]
pub struct Amm<L, C = SystemClock> {
    config: AmmConfig,
    ledger: L,
    clock: C,
    store: PoolStore,
}

impl<L: AssetLedger, C: Clock> Amm<L, C> {
    /// Creates an engine with no pools.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn new(config: AmmConfig, ledger: L, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ledger,
            clock,
            store: PoolStore::new(),
        })
    }

    /// The configuration the engine was built with.
    pub const fn config(&self) -> &AmmConfig {
        &self.config
    }

    /// The asset ledger.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The deadline clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of pools ever created.
    pub fn pool_count(&self) -> usize {
        self.store.len()
    }

    /// Snapshot of a pool's public state.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] for an unknown id.
    pub fn get_pool(&self, pool_id: PoolId) -> Result<PoolSnapshot> {
        Ok(self.store.lock(pool_id)?.snapshot())
    }

    /// Id of the pool trading `a` against `b`, in either order.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAsset`] if `a == b`, [`AmmError::PoolNotFound`]
    /// if no pool exists for the pair.
    pub fn pool_id(&self, a: AssetId, b: AssetId) -> Result<PoolId> {
        self.store.lookup(&AssetPair::new(a, b)?)
    }

    /// LP shares `holder` owns in a pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] for an unknown id.
    pub fn shares_of(&self, pool_id: PoolId, holder: AccountId) -> Result<Shares> {
        Ok(self.store.lock(pool_id)?.shares_of(&holder))
    }
}

/// Logs an ordinary rejection at `debug` before handing the error back.
/// Invariant violations were already logged where they were raised.
fn rejected(op: &'static str) -> impl FnOnce(AmmError) -> AmmError {
    move |err| {
        if !err.is_defect() {
            debug!(op, error = %err, "request rejected");
        }
        err
    }
}
