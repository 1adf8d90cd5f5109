//! Engine configuration.
//!
//! [`AmmConfig`] carries the fee defaults and routing limits every
//! [`Amm`](crate::Amm) is built with.  It deserializes from TOML and is
//! validated before the engine accepts it.

mod amm_config;

pub use amm_config::AmmConfig;
