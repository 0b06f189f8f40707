//! Cache Statistics Module
//!
//! Hit/miss/eviction counters kept by each `CacheStore`.

use serde::Serialize;

use crate::cache::PolicyKind;

// == Cache Stats ==
/// Snapshot of one cache store's counters.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub policy: PolicyKind,
    pub capacity: usize,
    /// Successful lookups
    pub hits: u64,
    /// Lookups for absent keys
    pub misses: u64,
    /// Entries removed to admit a new key
    pub evictions: u64,
    /// Live entries at snapshot time
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new(policy: PolicyKind, capacity: usize) -> Self {
        Self {
            policy,
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
            total_entries: 0,
        }
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
