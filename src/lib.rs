//! # Hydra Swap
//!
//! Constant-product liquidity pools (`x · y = k`) and an atomic
//! multi-hop swap router.
//!
//! The crate keeps the pool ledger (reserves, LP shares, fee counters)
//! and prices and executes trades against it.  Asset balances live in an
//! external ledger reached through the [`AssetLedger`](traits::AssetLedger)
//! trait; every call either commits all of its pool updates and transfers
//! or leaves everything as it was.
//!
//! # Quick Start
//!
//! ```rust
//! use hydra_swap::prelude::*;
//!
//! let usd = AssetId::from_bytes([1u8; 32]);
//! let eur = AssetId::from_bytes([2u8; 32]);
//! let gbp = AssetId::from_bytes([3u8; 32]);
//! let lp = AccountId::from_bytes([0x11; 32]);
//! let trader = AccountId::from_bytes([0x22; 32]);
//!
//! // 1. Fund accounts in the reference ledger
//! let ledger = InMemoryLedger::new();
//! for asset in [usd, eur, gbp] {
//!     ledger.mint(asset, lp, Amount::new(1_000_000)).expect("mint");
//! }
//! ledger.mint(usd, trader, Amount::new(1_000)).expect("mint");
//!
//! // 2. Build the engine and two pools
//! let amm = Amm::new(AmmConfig::default(), ledger, ManualClock::new(0)).expect("valid config");
//! amm.create_pool(lp, usd, eur, Amount::new(10_000), Amount::new(10_000)).expect("pool");
//! amm.create_pool(lp, eur, gbp, Amount::new(10_000), Amount::new(10_000)).expect("pool");
//!
//! // 3. Route USD -> EUR -> GBP
//! let path = SwapPath::new(vec![usd, eur, gbp]).expect("valid path");
//! let quote = amm.get_amounts_out(&path, Amount::new(100)).expect("quote");
//! let out = amm
//!     .swap_exact_tokens_for_tokens(trader, &path, Amount::new(100), quote.amount_out(), 10)
//!     .expect("swap");
//! assert_eq!(out, quote.amount_out());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Router     │  find_pools, get_amounts_*, swap_*_tokens_*
//! └──────┬───────┘
//!        │ quote, then lock all hops by PoolId
//!        ▼
//! ┌──────────────┐     ┌──────────────┐
//! │  Swap Engine  │     │  Liquidity   │  create / add / remove
//! └──────┬───────┘     └──────┬───────┘
//!        │ stage → transfer → commit
//!        ▼                    ▼
//! ┌──────────────┐     ┌──────────────┐
//! │  Pool Store   │     │ Asset Ledger │  external, via trait
//! └──────────────┘     └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AssetPair`](domain::AssetPair), [`SwapPath`](domain::SwapPath), receipts |
//! | [`engine`] | [`Amm`], the coordinating service, and the pure quote functions |
//! | [`traits`] | Collaborator seams: [`AssetLedger`](traits::AssetLedger), [`Clock`](traits::Clock) |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) reference ledger |
//! | [`config`] | [`AmmConfig`](config::AmmConfig) fee defaults and routing limits |
//! | [`math`]   | Checked arithmetic, integer square root, 256-bit safe `mul_div` |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod math;
pub mod prelude;
pub mod traits;

mod pools;

pub use engine::{quote_amount_in, quote_amount_out, Amm};
