//! Integer arithmetic used by pricing and share accounting.
//!
//! - [`CheckedArithmetic`]: `Result`-returning ops on amounts and shares
//! - [`div_round`]: `u128` division with explicit rounding
//! - [`isqrt`]: Newton integer square root for initial share minting
//! - [`mul_div`] / [`mul_div_wide`] / [`constant_product`]: 256-bit safe
//!   intermediates

mod checked;
mod rounding;
mod sqrt;
mod wide;

pub use checked::CheckedArithmetic;
pub use rounding::div_round;
pub use sqrt::isqrt;
pub use wide::{constant_product, mul_div, mul_div_wide};
