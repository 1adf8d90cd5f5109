//! Canonically ordered pair of distinct assets.

use super::AssetId;
use crate::error::AmmError;

/// Which side of a pool an asset sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The lower asset id (`x`).
    X,
    /// The higher asset id (`y`).
    Y,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// An unordered pair of distinct assets stored in canonical order.
///
/// `x` is always the lexicographically lower id, so `(A, B)` and `(B, A)`
/// produce equal pairs and therefore resolve to one pool.
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::{AssetId, AssetPair};
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
/// assert_eq!(AssetPair::new(b, a), AssetPair::new(a, b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetPair {
    x: AssetId,
    y: AssetId,
}

impl AssetPair {
    /// Creates the canonical pair for two assets.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if both ids are equal.
    pub fn new(a: AssetId, b: AssetId) -> Result<Self, AmmError> {
        if a == b {
            return Err(AmmError::InvalidAsset("pair requires two distinct assets"));
        }
        let (x, y) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { x, y })
    }

    /// Returns the lower asset.
    #[must_use]
    pub const fn x(&self) -> AssetId {
        self.x
    }

    /// Returns the higher asset.
    #[must_use]
    pub const fn y(&self) -> AssetId {
        self.y
    }

    /// Returns the side `asset` occupies.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `asset` is not in the pair.
    pub fn side_of(&self, asset: &AssetId) -> Result<Side, AmmError> {
        if *asset == self.x {
            Ok(Side::X)
        } else if *asset == self.y {
            Ok(Side::Y)
        } else {
            Err(AmmError::InvalidAsset("asset is not part of this pool"))
        }
    }

    /// Returns the asset on `side`.
    #[must_use]
    pub const fn asset(&self, side: Side) -> AssetId {
        match side {
            Side::X => self.x,
            Side::Y => self.y,
        }
    }

    /// Returns `true` if `asset` is one of the pair.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.x == *asset || self.y == *asset
    }
}
