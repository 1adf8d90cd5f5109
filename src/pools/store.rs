//! Arena + index registry of pools.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex, RwLock};

use super::Pool;
use crate::domain::{AssetPair, PoolId};
use crate::error::{AmmError, Result};

/// Exclusive access to one pool, independent of the store's own locks.
pub(crate) type PoolGuard = ArcMutexGuard<RawMutex, Pool>;

/// Registry of every pool, keyed both by dense [`PoolId`] and by
/// canonical [`AssetPair`].
///
/// Pools are appended to an arena and never removed, so a `PoolId` stays
/// valid for the life of the store.  Each pool sits behind its own
/// mutex; the arena and index locks are only held long enough to find a
/// pool, never while a pool is locked.
///
/// Lock order, when more than one is held: index, arena, then pool
/// mutexes by ascending `PoolId`.
#[derive(Debug, Default)]
pub(crate) struct PoolStore {
    index: RwLock<HashMap<AssetPair, PoolId>>,
    pools: RwLock<Vec<Arc<Mutex<Pool>>>>,
}

impl PoolStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.pools.read().len()
    }

    /// Finds the pool for a canonical pair.
    pub(crate) fn lookup(&self, pair: &AssetPair) -> Result<PoolId> {
        self.index
            .read()
            .get(pair)
            .copied()
            .ok_or(AmmError::PoolNotFound)
    }

    /// Registers a new pool for `pair`.
    ///
    /// `build` receives the id the pool will get and returns the funded
    /// pool.  The index write lock is held across the existence check,
    /// `build` and the insertion, so at most one creation per pair can
    /// succeed.  If `build` fails nothing is registered.
    pub(crate) fn insert_with<F>(&self, pair: AssetPair, build: F) -> Result<PoolId>
    where
        F: FnOnce(PoolId) -> Result<Pool>,
    {
        let mut index = self.index.write();
        if index.contains_key(&pair) {
            return Err(AmmError::PoolAlreadyExists);
        }
        let next = u32::try_from(self.pools.read().len())
            .map_err(|_| AmmError::invariant("pool id space exhausted"))?;
        let id = PoolId::new(next);

        let pool = build(id)?;
        if pool.id() != id || pool.pair() != pair {
            return Err(AmmError::invariant("built pool does not match its slot"));
        }

        self.pools.write().push(Arc::new(Mutex::new(pool)));
        index.insert(pair, id);
        Ok(id)
    }

    fn handle(&self, id: PoolId) -> Result<Arc<Mutex<Pool>>> {
        let index = usize::try_from(id.get()).map_err(|_| AmmError::PoolNotFound)?;
        self.pools
            .read()
            .get(index)
            .cloned()
            .ok_or(AmmError::PoolNotFound)
    }

    /// Locks one pool.
    pub(crate) fn lock(&self, id: PoolId) -> Result<PoolGuard> {
        Ok(self.handle(id)?.lock_arc())
    }

    /// Locks several distinct pools, acquiring them in ascending id order.
    ///
    /// Guards are returned in the order of `ids`.
    pub(crate) fn lock_many(&self, ids: &[PoolId]) -> Result<Vec<PoolGuard>> {
        let mut order: Vec<usize> = (0..ids.len()).collect();
        order.sort_by_key(|&i| ids[i]);
        if order.windows(2).any(|w| ids[w[0]] == ids[w[1]]) {
            return Err(AmmError::invariant("pool locked twice in one call"));
        }

        let handles = ids
            .iter()
            .map(|id| self.handle(*id))
            .collect::<Result<Vec<_>>>()?;

        let mut slots: Vec<Option<PoolGuard>> = ids.iter().map(|_| None).collect();
        for i in order {
            slots[i] = Some(handles[i].lock_arc());
        }
        slots
            .into_iter()
            .map(|slot| slot.ok_or_else(|| AmmError::invariant("pool guard missing")))
            .collect()
    }
}
