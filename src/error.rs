//! Unified error types for the Hydra swap engine.
//!
//! Every fallible operation in the crate returns [`AmmError`].  All
//! variants except [`AmmError::InvariantViolation`] describe ordinary,
//! caller-correctable rejections; an invariant violation signals an
//! arithmetic or locking defect and is always logged at `error` level
//! before it is returned.

use thiserror::Error;

/// Errors surfaced by the asset ledger collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The source account does not hold enough of the asset.
    #[error("insufficient balance: needed {needed}, available {available}")]
    InsufficientBalance {
        /// Amount the transfer required.
        needed: u128,
        /// Amount actually held by the source account.
        available: u128,
    },

    /// The source or destination account refuses transfers.
    #[error("account is frozen")]
    AccountFrozen,

    /// Crediting the destination would overflow its balance.
    #[error("destination balance overflow")]
    Overflow,
}

/// Unified error enum for pool, liquidity and routing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Zero, out-of-range, or overflowing amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// Asset is not part of the pool, or the two assets are identical.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// Malformed swap path (too short, too long, or cyclic).
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    /// Fee rate outside the permitted range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Engine configuration failed to parse or validate.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No pool exists for the requested pair or id.
    #[error("pool not found")]
    PoolNotFound,

    /// A pool for the canonical pair is already registered.
    #[error("pool already exists")]
    PoolAlreadyExists,

    /// Reserves or the caller's share balance cannot satisfy the request.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// Computed amount violates the caller's minimum or maximum.
    #[error("slippage exceeded: computed {amount}, limit {limit}")]
    SlippageExceeded {
        /// Amount produced by the pricing formula.
        amount: u128,
        /// Bound supplied by the caller.
        limit: u128,
    },

    /// The request arrived after its deadline.
    #[error("deadline expired: deadline {deadline}, now {now}")]
    DeadlineExpired {
        /// Caller-supplied deadline (unix seconds).
        deadline: u64,
        /// Clock reading at call entry.
        now: u64,
    },

    /// A hop re-quoted under lock no longer matches the route quote.
    #[error("stale quote at hop {hop}: quoted {quoted}, actual {actual}")]
    StaleQuote {
        /// Zero-based hop index.
        hop: usize,
        /// Amount computed during the quote phase.
        quoted: u128,
        /// Amount computed during the commit phase.
        actual: u128,
    },

    /// Internal consistency check failed; indicates a defect.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// The asset ledger rejected a transfer.
    #[error("transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
}

impl AmmError {
    /// Returns `true` for errors that indicate a programming defect rather
    /// than a rejected request.
    #[must_use]
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }

    /// Builds an [`AmmError::InvariantViolation`] and logs it.
    pub(crate) fn invariant(context: &'static str) -> Self {
        tracing::error!(context, "amm invariant violated");
        Self::InvariantViolation(context)
    }
}

/// Crate-wide result alias.
pub type Result<T, E = AmmError> = core::result::Result<T, E>;
