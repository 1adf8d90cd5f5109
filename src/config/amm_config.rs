//! Engine-wide configuration.

use serde::{Deserialize, Serialize};

use crate::domain::{BasisPoints, BPS_DENOMINATOR};
use crate::error::AmmError;

/// Tunables shared by every pool and route of an [`Amm`](crate::Amm).
///
/// Missing fields take their defaults when deserializing, so an empty
/// TOML document yields [`AmmConfig::default`].
///
/// | Field | Default | Constraint |
/// |-------|---------|------------|
/// | `default_fee_bps` | 30 | `<= max_fee_bps` |
/// | `max_fee_bps` | 1000 | `< 10000` |
/// | `max_hops` | 4 | `>= 1` |
///
/// # Examples
///
/// ```
/// use hydra_swap::config::AmmConfig;
///
/// let Ok(config) = AmmConfig::from_toml_str("max_hops = 2") else {
///     panic!("valid config");
/// };
/// assert_eq!(config.max_hops, 2);
/// assert_eq!(config.default_fee_bps, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmmConfig {
    /// Fee applied by [`Amm::create_pool`](crate::Amm::create_pool).
    pub default_fee_bps: u32,
    /// Highest fee accepted by
    /// [`Amm::create_pool_with_fee`](crate::Amm::create_pool_with_fee).
    pub max_fee_bps: u32,
    /// Longest route, in pools, the router will execute.
    pub max_hops: usize,
}

impl Default for AmmConfig {
    fn default() -> Self {
        Self {
            default_fee_bps: 30,
            max_fee_bps: 1_000,
            max_hops: 4,
        }
    }
}

impl AmmConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the document does not
    /// parse or fails [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> Result<Self, AmmError> {
        let config: Self = toml::from_str(source)
            .map_err(|e| AmmError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the field constraints listed on [`AmmConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] naming the first
    /// violated constraint.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.max_fee_bps >= BPS_DENOMINATOR {
            return Err(AmmError::InvalidConfiguration(format!(
                "max_fee_bps must be below {BPS_DENOMINATOR}, got {}",
                self.max_fee_bps
            )));
        }
        if self.default_fee_bps > self.max_fee_bps {
            return Err(AmmError::InvalidConfiguration(format!(
                "default_fee_bps {} exceeds max_fee_bps {}",
                self.default_fee_bps, self.max_fee_bps
            )));
        }
        if self.max_hops == 0 {
            return Err(AmmError::InvalidConfiguration(
                "max_hops must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// The default fee as [`BasisPoints`].
    #[must_use]
    pub const fn default_fee(&self) -> BasisPoints {
        BasisPoints::new(self.default_fee_bps)
    }

    /// Rejects fees above `max_fee_bps`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `fee` is too high.
    pub fn check_fee(&self, fee: BasisPoints) -> Result<(), AmmError> {
        if fee.get() > self.max_fee_bps {
            return Err(AmmError::InvalidFee("fee exceeds configured maximum"));
        }
        Ok(())
    }
}
