//! In-memory reference ledger.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::TransferError;
use crate::traits::AssetLedger;

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<(AccountId, AssetId), u128>,
    frozen: HashSet<AccountId>,
}

impl LedgerState {
    fn balance(&self, account: AccountId, asset: AssetId) -> u128 {
        self.balances.get(&(account, asset)).copied().unwrap_or(0)
    }

    fn set(&mut self, account: AccountId, asset: AssetId, value: u128) {
        if value == 0 {
            self.balances.remove(&(account, asset));
        } else {
            self.balances.insert((account, asset), value);
        }
    }
}

/// A thread-safe [`AssetLedger`] backed by a `HashMap`.
///
/// Balances live behind one [`Mutex`], so each transfer is atomic.
/// [`freeze`](Self::freeze) makes every transfer touching an account fail
/// with [`TransferError::AccountFrozen`], which is how tests inject a
/// failure part-way through a multi-hop swap.
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::{AccountId, Amount, AssetId};
/// use hydra_swap::ledger::InMemoryLedger;
/// use hydra_swap::traits::AssetLedger;
///
/// let ledger = InMemoryLedger::new();
/// let usd = AssetId::from_bytes([1u8; 32]);
/// let alice = AccountId::from_bytes([0xa1; 32]);
/// let bob = AccountId::from_bytes([0xb0; 32]);
///
/// let Ok(()) = ledger.mint(usd, alice, Amount::new(50)) else { panic!() };
/// let Ok(()) = ledger.transfer(usd, alice, bob, Amount::new(20)) else { panic!() };
/// assert_eq!(ledger.balance_of(usd, bob), Amount::new(20));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `account` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Overflow`] if the balance would overflow.
    pub fn mint(
        &self,
        asset: AssetId,
        account: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let mut state = self.state.lock();
        let credited = state
            .balance(account, asset)
            .checked_add(amount.get())
            .ok_or(TransferError::Overflow)?;
        state.set(account, asset, credited);
        Ok(())
    }

    /// Current balance of `asset` held by `account`.
    pub fn balance_of(&self, asset: AssetId, account: AccountId) -> Amount {
        Amount::new(self.state.lock().balance(account, asset))
    }

    /// Makes every transfer from or to `account` fail.
    pub fn freeze(&self, account: AccountId) {
        self.state.lock().frozen.insert(account);
    }

    /// Lifts a [`freeze`](Self::freeze).
    pub fn unfreeze(&self, account: AccountId) {
        self.state.lock().frozen.remove(&account);
    }
}

impl AssetLedger for InMemoryLedger {
    fn transfer(
        &self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let mut state = self.state.lock();
        if state.frozen.contains(&from) || state.frozen.contains(&to) {
            return Err(TransferError::AccountFrozen);
        }

        let available = state.balance(from, asset);
        let Some(debited) = available.checked_sub(amount.get()) else {
            return Err(TransferError::InsufficientBalance {
                needed: amount.get(),
                available,
            });
        };
        if from == to {
            return Ok(());
        }
        let credited = state
            .balance(to, asset)
            .checked_add(amount.get())
            .ok_or(TransferError::Overflow)?;

        state.set(from, asset, debited);
        state.set(to, asset, credited);
        Ok(())
    }
}
