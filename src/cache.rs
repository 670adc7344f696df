//! Bounded, cost-aware mask cache.
//!
//! Entries are charged their byte size. When a `put` pushes the total over
//! budget, unpinned entries are evicted least-recently-used first. Entries
//! whose name belongs to a registered [`ResourceList`](crate::ResourceList)
//! are pinned and never evicted for capacity. Pinning follows the registry
//! as it is at eviction time, so deregistering a list releases its entries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::mask::{Mask, MaskKey};
use crate::registry::ResourceRegistry;

/// Default budget: 8 MiB of mask pixels.
pub const DEFAULT_CACHE_BUDGET: usize = 8 * 1024 * 1024;

#[derive(Debug)]
struct CacheEntry {
    mask: Arc<Mask>,
    cost: usize,
    last_used: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<MaskKey, CacheEntry>,
    total_cost: usize,
    tick: u64,
}

impl CacheState {
    fn next_tick(&mut self) -> u64 {
        self.tick = self.tick.wrapping_add(1);
        self.tick
    }

    fn evict_to(&mut self, budget: usize, registry: &ResourceRegistry) {
        if self.total_cost <= budget {
            return;
        }
        let mut candidates: Vec<(u64, MaskKey)> = self
            .entries
            .iter()
            .filter(|(key, _)| !registry.should_cache(key))
            .map(|(key, entry)| (entry.last_used, key.clone()))
            .collect();
        candidates.sort_unstable_by_key(|(last_used, _)| *last_used);

        for (_, key) in candidates {
            if self.total_cost <= budget {
                return;
            }
            if let Some(entry) = self.entries.remove(&key) {
                self.total_cost -= entry.cost;
                log::debug!("evicted mask {key} ({} bytes)", entry.cost);
            }
        }

        if self.total_cost > budget {
            log::debug!(
                "mask cache over budget by {} bytes of pinned masks",
                self.total_cost - budget
            );
        }
    }
}

/// A thread-safe mask cache shared by views and background pre-warming.
///
/// Masks are handed out as `Arc<Mask>`; a fetched mask stays valid after it
/// is evicted, but a later `get` for the same key may miss.
#[derive(Debug)]
pub struct MaskCache {
    budget: usize,
    registry: Arc<ResourceRegistry>,
    state: Mutex<CacheState>,
}

impl MaskCache {
    /// Creates a cache with a total-cost budget in bytes.
    ///
    /// `registry` decides which entries are pinned.
    pub fn new(budget: usize, registry: Arc<ResourceRegistry>) -> Self {
        Self {
            budget,
            registry,
            state: Mutex::new(CacheState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn registry(&self) -> &Arc<ResourceRegistry> {
        &self.registry
    }

    /// Returns the mask for `key` and marks it most recently used.
    pub fn get(&self, key: &MaskKey) -> Option<Arc<Mask>> {
        let mut state = self.lock();
        let tick = state.next_tick();
        let entry = state.entries.get_mut(key)?;
        entry.last_used = tick;
        Some(Arc::clone(&entry.mask))
    }

    /// Returns true if `key` is resident. Does not affect recency.
    pub fn contains(&self, key: &MaskKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Stores `mask` under `key`, replacing any previous entry, then evicts
    /// until the cache is back under budget.
    pub fn put(&self, key: MaskKey, mask: impl Into<Arc<Mask>>) {
        let mask = mask.into();
        let cost = mask.cost();

        // The registry is only ever locked inside our lock, never the other
        // way round.
        let mut state = self.lock();
        let tick = state.next_tick();
        if let Some(old) = state.entries.remove(&key) {
            state.total_cost -= old.cost;
        }
        log::debug!("caching mask {key} ({cost} bytes)");
        state.entries.insert(
            key,
            CacheEntry {
                mask,
                cost,
                last_used: tick,
            },
        );
        state.total_cost += cost;
        state.evict_to(self.budget, &self.registry);
    }

    /// Removes and returns the entry for `key`.
    pub fn remove(&self, key: &MaskKey) -> Option<Arc<Mask>> {
        let mut state = self.lock();
        let entry = state.entries.remove(key)?;
        state.total_cost -= entry.cost;
        Some(entry.mask)
    }

    /// Returns true if `key` is resident and currently exempt from eviction.
    pub fn is_pinned(&self, key: &MaskKey) -> bool {
        let state = self.lock();
        state.entries.contains_key(key) && self.registry.should_cache(key)
    }

    /// Sum of the costs of all resident entries.
    pub fn total_cost(&self) -> usize {
        self.lock().total_cost
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Drops every entry, pinned or not.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.total_cost = 0;
    }
}
