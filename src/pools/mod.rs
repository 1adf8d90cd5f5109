//! Pool records and the registry that owns them.
//!
//! | Type | Role |
//! |------|------|
//! | [`Pool`] | reserves, LP shares and fee counters of one pair |
//! | [`PoolUpdate`] | state staged by an engine before its transfers run |
//! | [`PoolStore`] | arena of per-pool mutexes plus a pair index |

mod pool;
mod store;

pub(crate) use pool::{Pool, PoolUpdate};
pub(crate) use store::{PoolGuard, PoolStore};
