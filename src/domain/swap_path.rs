//! Validated multi-hop swap path.

use std::collections::HashSet;

use super::AssetId;
use crate::error::AmmError;

/// An ordered list of assets to trade through, one pool per adjacent pair.
///
/// `[A, B, C]` means pool(A, B) then pool(B, C).
///
/// # Invariants
///
/// - At least two assets.
/// - No asset appears twice.  This rejects paths that would revisit a
///   pool (`A → B → A`) as well as longer cycles.
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::{AssetId, SwapPath};
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
/// let c = AssetId::from_bytes([3u8; 32]);
///
/// let path = SwapPath::new(vec![a, b, c]).expect("valid path");
/// assert_eq!(path.hops(), 2);
/// assert!(SwapPath::new(vec![a, b, a]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwapPath(Vec<AssetId>);

impl SwapPath {
    /// Validates and wraps a path.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if the path has fewer than two
    /// assets or repeats an asset.
    pub fn new(assets: Vec<AssetId>) -> Result<Self, AmmError> {
        if assets.len() < 2 {
            return Err(AmmError::InvalidPath("path needs at least two assets"));
        }
        let mut seen = HashSet::with_capacity(assets.len());
        if !assets.iter().all(|asset| seen.insert(*asset)) {
            return Err(AmmError::InvalidPath("path must not revisit an asset"));
        }
        Ok(Self(assets))
    }

    /// Number of pools the path traverses.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.0.len() - 1
    }

    /// Consecutive `(asset_in, asset_out)` pairs in trade order.
    pub fn pairs(&self) -> impl DoubleEndedIterator<Item = (AssetId, AssetId)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Asset the caller pays.
    #[must_use]
    pub fn first(&self) -> AssetId {
        self.0[0]
    }

    /// Asset the caller receives.
    #[must_use]
    pub fn last(&self) -> AssetId {
        self.0[self.0.len() - 1]
    }

    /// Returns the assets as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[AssetId] {
        &self.0
    }
}

impl TryFrom<Vec<AssetId>> for SwapPath {
    type Error = AmmError;

    fn try_from(assets: Vec<AssetId>) -> Result<Self, Self::Error> {
        Self::new(assets)
    }
}
