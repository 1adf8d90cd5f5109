//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_swap::prelude::*;
//! ```
//!
//! Brings in the engine, the value types every call takes or returns,
//! the collaborator traits with their bundled implementations, the
//! configuration, and the error types.

pub use crate::domain::{
    AccountId, AddLiquidityReceipt, Amount, AssetId, AssetPair, BasisPoints, CreatePoolReceipt,
    HopQuote, PoolId, PoolSnapshot, RemoveLiquidityReceipt, RouteQuote, Shares, SwapPath,
};

pub use crate::engine::{quote_amount_in, quote_amount_out, Amm};

pub use crate::traits::{AssetLedger, Clock, ManualClock, SystemClock};

pub use crate::ledger::InMemoryLedger;

pub use crate::config::AmmConfig;

pub use crate::error::{AmmError, Result, TransferError};
