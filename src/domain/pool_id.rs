//! Pool arena index.

use core::fmt;

use super::AccountId;

/// Prefix marking custody accounts; no user key derives to it.
const CUSTODY_PREFIX: [u8; 8] = *b"hydra/cp";

/// Dense index of a pool in the pool store.
///
/// Ids are assigned in creation order and never reused.  Their ordering is
/// the canonical lock order for calls that touch several pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolId(u32);

impl PoolId {
    /// Wraps a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The ledger account that holds this pool's reserves.
    #[must_use]
    pub fn custody_account(&self) -> AccountId {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&CUSTODY_PREFIX);
        bytes[28..].copy_from_slice(&self.0.to_be_bytes());
        AccountId::from_bytes(bytes)
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}
