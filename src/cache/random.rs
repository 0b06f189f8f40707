//! Random Cache Module
//!
//! Evicts a uniformly random live key. Keys are kept in a dense vector so a
//! victim is one index draw away.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cache::{CacheItem, EvictionPolicy};

#[derive(Debug)]
struct Slot {
    item: CacheItem,
    /// Position of this key in `RandomCache::keys`
    position: usize,
}

// == Random Cache ==
#[derive(Debug)]
pub struct RandomCache {
    entries: HashMap<String, Slot>,
    keys: Vec<String>,
    rng: StdRng,
}

impl Default for RandomCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomCache {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible victim selection.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            entries: HashMap::new(),
            keys: Vec::new(),
            rng,
        }
    }

    /// Removes `keys[position]`, moving the last key into the hole.
    fn take_position(&mut self, position: usize) -> String {
        let key = self.keys.swap_remove(position);
        if let Some(moved) = self.keys.get(position) {
            if let Some(slot) = self.entries.get_mut(moved) {
                slot.position = position;
            }
        }
        key
    }
}

impl EvictionPolicy for RandomCache {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&mut self, key: &str) -> Option<&CacheItem> {
        self.entries.get(key).map(|slot| &slot.item)
    }

    fn put(&mut self, item: CacheItem) {
        if let Some(slot) = self.entries.get_mut(&item.key) {
            slot.item = item;
            return;
        }

        let position = self.keys.len();
        self.keys.push(item.key.clone());
        self.entries.insert(item.key.clone(), Slot { item, position });
    }

    fn remove(&mut self, key: &str) -> Option<CacheItem> {
        let slot = self.entries.remove(key)?;
        self.take_position(slot.position);
        Some(slot.item)
    }

    fn evict(&mut self) -> Option<CacheItem> {
        if self.keys.is_empty() {
            return None;
        }
        let position = self.rng.random_range(0..self.keys.len());
        let key = self.take_position(position);
        self.entries.remove(&key).map(|slot| slot.item)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
    }
}
