//! LFU Cache Module
//!
//! Evicts the entry with the fewest accesses. Entries live directly in the
//! `FrequencyHeap`, whose position index doubles as the key lookup.

use crate::cache::{CacheItem, EvictionPolicy, FrequencyHeap, LfuNode};

#[derive(Debug, Default)]
pub struct LfuCache {
    heap: FrequencyHeap,
}

impl LfuCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current access count of a key, without counting as an access.
    pub fn frequency(&self, key: &str) -> Option<u64> {
        self.heap
            .position(key)
            .map(|index| self.heap.node(index).frequency)
    }
}

impl EvictionPolicy for LfuCache {
    fn len(&self) -> usize {
        self.heap.len()
    }

    fn contains(&self, key: &str) -> bool {
        self.heap.position(key).is_some()
    }

    fn get(&mut self, key: &str) -> Option<&CacheItem> {
        let index = self.heap.position(key)?;
        let index = self.heap.increment(index);
        Some(&self.heap.node(index).item)
    }

    fn put(&mut self, item: CacheItem) {
        match self.heap.position(&item.key) {
            Some(index) => {
                self.heap.node_mut(index).item = item;
                self.heap.increment(index);
            }
            None => self.heap.push(LfuNode { item, frequency: 1 }),
        }
    }

    fn remove(&mut self, key: &str) -> Option<CacheItem> {
        let index = self.heap.position(key)?;
        Some(self.heap.remove(index).item)
    }

    fn evict(&mut self) -> Option<CacheItem> {
        self.heap.pop_min().map(|node| node.item)
    }

    fn clear(&mut self) {
        self.heap.clear();
    }
}
