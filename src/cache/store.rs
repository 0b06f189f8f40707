//! Cache Store Module
//!
//! Bounded cache engine: capacity enforcement and statistics on top of a
//! pluggable `EvictionPolicy`.

use tracing::{debug, info};

use crate::cache::{CacheItem, CacheStats, EvictionPolicy, PolicyKind};
use crate::error::{Result, WelpError};

// == Cache Store ==
/// Bounded key-value store. Not synchronized; share it as a `SharedCacheStore`
/// so every operation, eviction included, runs under one lock.
#[derive(Debug)]
pub struct CacheStore {
    policy: Box<dyn EvictionPolicy>,
    kind: PolicyKind,
    capacity: usize,
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `kind` - Eviction policy applied when the store is full
    /// * `capacity` - Maximum number of entries, must be at least 1
    pub fn new(kind: PolicyKind, capacity: usize) -> Result<Self> {
        Self::with_policy(kind, kind.build(), capacity)
    }

    /// Creates a store from a policy name such as `"lru"`.
    pub fn from_name(policy: &str, capacity: usize) -> Result<Self> {
        Self::new(policy.parse()?, capacity)
    }

    /// Creates a store around an already constructed policy container.
    pub fn with_policy(
        kind: PolicyKind,
        policy: Box<dyn EvictionPolicy>,
        capacity: usize,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(WelpError::InvalidConfiguration(
                "cache capacity must be at least 1".to_string(),
            ));
        }
        info!("eviction policy: {} cache, capacity {}", kind, capacity);

        Ok(Self {
            policy,
            kind,
            capacity,
            stats: CacheStats::new(kind, capacity),
        })
    }

    // == Set ==
    /// Inserts or overwrites an item.
    ///
    /// Inserting a new key into a full store evicts exactly one victim first.
    /// Never fails: keys and values of any size are admitted.
    pub fn set(&mut self, item: CacheItem) {
        if !self.policy.contains(&item.key) && self.policy.len() >= self.capacity {
            match self.policy.evict() {
                Some(victim) => {
                    debug!(policy = %self.kind, key = %victim.key, "evicted");
                    self.stats.record_eviction();
                }
                None => unreachable!(
                    "{} policy holds {} entries but produced no victim",
                    self.kind,
                    self.policy.len()
                ),
            }
        }

        self.policy.put(item);
        debug_assert!(self.policy.len() <= self.capacity);
    }

    // == Get ==
    /// Returns a copy of the stored item, updating policy metadata.
    pub fn get(&mut self, key: &str) -> Result<CacheItem> {
        let found = self.policy.get(key).cloned();
        self.stats.record_lookup(found.is_some());
        found.ok_or_else(|| WelpError::NotFound(key.to_string()))
    }

    // == Delete ==
    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.policy
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| WelpError::NotFound(key.to_string()))
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.policy.clear();
    }

    pub fn len(&self) -> usize {
        self.policy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policy.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> PolicyKind {
        self.kind
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.policy.len();
        stats
    }
}
