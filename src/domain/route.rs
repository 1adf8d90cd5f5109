//! Quoted routes through one or more pools.

use core::fmt;

use super::{Amount, AssetId, PoolId};

/// Quote for one hop of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HopQuote {
    /// Pool traded against.
    pub pool_id: PoolId,
    /// Asset paid into the pool.
    pub asset_in: AssetId,
    /// Asset taken out of the pool.
    pub asset_out: AssetId,
    /// Amount paid in, fee included.
    pub amount_in: Amount,
    /// Amount taken out.
    pub amount_out: Amount,
    /// Portion of `amount_in` retained as fee.
    pub fee: Amount,
}

impl fmt::Display for HopQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} -> {} {} (fee {})",
            self.pool_id, self.amount_in, self.asset_in, self.amount_out, self.asset_out, self.fee
        )
    }
}

/// Quote for a complete route, one [`HopQuote`] per pool in trade order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteQuote {
    hops: Vec<HopQuote>,
}

impl RouteQuote {
    pub(crate) fn new(hops: Vec<HopQuote>) -> Self {
        Self { hops }
    }

    /// Per-hop quotes.
    #[must_use]
    pub fn hops(&self) -> &[HopQuote] {
        &self.hops
    }

    /// Amount the caller pays into the first pool.
    pub fn amount_in(&self) -> Amount {
        self.hops.first().map_or(Amount::ZERO, |h| h.amount_in)
    }

    /// Amount the caller receives from the last pool.
    pub fn amount_out(&self) -> Amount {
        self.hops.last().map_or(Amount::ZERO, |h| h.amount_out)
    }

    /// Amounts at every step: the input followed by each hop's output.
    #[must_use]
    pub fn amounts(&self) -> Vec<Amount> {
        let mut amounts = Vec::with_capacity(self.hops.len() + 1);
        amounts.push(self.amount_in());
        amounts.extend(self.hops.iter().map(|h| h.amount_out));
        amounts
    }
}
