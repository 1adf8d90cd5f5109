//! Value types shared by the pool store, engines and router.
//!
//! Identifiers, amounts, fee rates, paths and the receipts returned to
//! callers.  Newtypes keep asset amounts, share counts and ids from being
//! mixed up at call sites.

mod account_id;
mod amount;
mod asset_id;
mod asset_pair;
mod basis_points;
mod pool_id;
mod receipts;
mod rounding;
mod route;
mod shares;
mod swap_path;

pub use account_id::AccountId;
pub use amount::Amount;
pub use asset_id::AssetId;
pub use asset_pair::{AssetPair, Side};
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use pool_id::PoolId;
pub use receipts::{AddLiquidityReceipt, CreatePoolReceipt, PoolSnapshot, RemoveLiquidityReceipt};
pub use rounding::Rounding;
pub use route::{HopQuote, RouteQuote};
pub use shares::Shares;
pub use swap_path::SwapPath;
