//! Chain-agnostic fungible asset identifier.

use core::fmt;

/// Identifies one fungible asset held in the asset ledger.
///
/// Wraps a 32-byte identifier.  Ordering is lexicographic over the bytes
/// and is what canonicalizes pool pairs.
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::AssetId;
///
/// let usdc = AssetId::from_bytes([1u8; 32]);
/// let weth = AssetId::from_bytes([2u8; 32]);
/// assert!(usdc < weth);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset:{}", hex::encode(&self.0[..6]))
    }
}
