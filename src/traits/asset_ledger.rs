//! The asset ledger collaborator.
//!
//! The engine never holds balances itself.  Every movement of assets
//! between a caller and a pool's custody account goes through
//! [`AssetLedger::transfer`], and pool state is only committed once every
//! transfer of a call has succeeded.

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::TransferError;

/// A store of fungible asset balances that can move value between
/// accounts.
///
/// Implementations must make each individual transfer atomic: on error,
/// no balance has changed.  The engine takes `&self` so a single ledger
/// can serve concurrent calls; implementations provide their own
/// interior synchronization.
pub trait AssetLedger {
    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] if the ledger refuses the transfer.
    fn transfer(
        &self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

impl<L: AssetLedger + ?Sized> AssetLedger for &L {
    fn transfer(
        &self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        (**self).transfer(asset, from, to, amount)
    }
}

impl<L: AssetLedger + ?Sized> AssetLedger for std::sync::Arc<L> {
    fn transfer(
        &self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        (**self).transfer(asset, from, to, amount)
    }
}
