//! Ordered Cache Module
//!
//! FIFO, LRU and MRU share one structure: a key index over an `OrderList`
//! whose head is the newest (FIFO) or most recently accessed (LRU/MRU) entry.

use std::collections::HashMap;

use crate::cache::{CacheItem, EvictionPolicy, OrderList};

// == Order Mode ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    /// Evict the oldest insertion; accesses do not reorder
    Fifo,
    /// Evict the least recently accessed entry (tail)
    Lru,
    /// Evict the most recently accessed entry (head)
    Mru,
}

impl OrderMode {
    fn reorders_on_access(&self) -> bool {
        !matches!(self, OrderMode::Fifo)
    }
}

// == Ordered Cache ==
#[derive(Debug)]
pub struct OrderedCache {
    mode: OrderMode,
    /// Key → slot in `order`
    index: HashMap<String, usize>,
    order: OrderList<CacheItem>,
}

impl OrderedCache {
    pub fn new(mode: OrderMode) -> Self {
        Self {
            mode,
            index: HashMap::new(),
            order: OrderList::new(),
        }
    }

    /// Keys from head to tail.
    #[cfg(test)]
    fn keys(&self) -> Vec<&str> {
        self.order.iter().map(|item| item.key.as_str()).collect()
    }
}

impl EvictionPolicy for OrderedCache {
    fn len(&self) -> usize {
        self.index.len()
    }

    fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    fn get(&mut self, key: &str) -> Option<&CacheItem> {
        let slot = *self.index.get(key)?;
        if self.mode.reorders_on_access() {
            self.order.move_to_front(slot);
        }
        self.order.get(slot)
    }

    fn put(&mut self, item: CacheItem) {
        if let Some(&slot) = self.index.get(&item.key) {
            if let Some(existing) = self.order.get_mut(slot) {
                existing.value = item.value;
            }
            // An overwrite is an access, not an insertion
            if self.mode.reorders_on_access() {
                self.order.move_to_front(slot);
            }
            return;
        }

        let key = item.key.clone();
        let slot = self.order.push_front(item);
        self.index.insert(key, slot);
    }

    fn remove(&mut self, key: &str) -> Option<CacheItem> {
        let slot = self.index.remove(key)?;
        self.order.remove(slot)
    }

    fn evict(&mut self) -> Option<CacheItem> {
        let slot = match self.mode {
            OrderMode::Fifo | OrderMode::Lru => self.order.back()?,
            OrderMode::Mru => self.order.front()?,
        };
        let victim = self.order.remove(slot)?;
        self.index.remove(&victim.key);
        Some(victim)
    }

    fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }
}
