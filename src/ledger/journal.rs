//! All-or-nothing sequences of ledger transfers.

use tracing::warn;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::{AmmError, Result};
use crate::traits::AssetLedger;

#[derive(Debug, Clone, Copy)]
struct Entry {
    asset: AssetId,
    from: AccountId,
    to: AccountId,
    amount: Amount,
}

/// Records the transfers of one engine call so a later failure can undo
/// the earlier ones.
///
/// On the first rejected transfer every completed entry is reversed in
/// LIFO order and the rejecting [`TransferError`](crate::error::TransferError)
/// is returned.  If a reversal itself is refused the ledger is left
/// inconsistent, which surfaces as [`AmmError::InvariantViolation`].
pub(crate) struct TransferJournal<'a, L: AssetLedger + ?Sized> {
    ledger: &'a L,
    entries: Vec<Entry>,
}

impl<'a, L: AssetLedger + ?Sized> TransferJournal<'a, L> {
    pub(crate) fn new(ledger: &'a L) -> Self {
        Self {
            ledger,
            entries: Vec::new(),
        }
    }

    /// Performs one transfer.  Zero amounts are skipped.
    pub(crate) fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        match self.ledger.transfer(asset, from, to, amount) {
            Ok(()) => {
                self.entries.push(Entry {
                    asset,
                    from,
                    to,
                    amount,
                });
                Ok(())
            }
            Err(err) => {
                warn!(
                    asset = %asset,
                    from = %from,
                    to = %to,
                    amount = %amount,
                    completed = self.entries.len(),
                    error = %err,
                    "transfer rejected, rolling back"
                );
                self.rollback()?;
                Err(err.into())
            }
        }
    }

    /// Number of transfers completed so far.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn rollback(&mut self) -> Result<()> {
        while let Some(entry) = self.entries.pop() {
            self.ledger
                .transfer(entry.asset, entry.to, entry.from, entry.amount)
                .map_err(|_| AmmError::invariant("transfer rollback rejected"))?;
        }
        Ok(())
    }
}
