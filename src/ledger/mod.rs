//! Asset ledger support.
//!
//! [`InMemoryLedger`] is a reference [`AssetLedger`](crate::traits::AssetLedger)
//! for tests and demos.  The transfer journal gives engine calls
//! all-or-nothing transfer sequences on top of any ledger.

mod journal;
mod memory;

pub(crate) use journal::TransferJournal;
pub use memory::InMemoryLedger;
