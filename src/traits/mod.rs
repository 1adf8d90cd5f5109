//! Seams between the engine and its collaborators.
//!
//! [`AssetLedger`] moves assets between accounts; [`Clock`] supplies the
//! time used for deadline checks.

mod asset_ledger;
mod clock;

pub use asset_ledger::AssetLedger;
pub use clock::{Clock, ManualClock, SystemClock};
