//! Cache Module
//!
//! Bounded in-memory key-value caching with five interchangeable eviction
//! policies: FIFO, Random, LRU, MRU and LFU.

mod freq_heap;
mod item;
mod lfu;
mod order_list;
mod ordered;
mod policy;
mod random;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;

use tokio::sync::Mutex;

// Re-export public types
pub use freq_heap::{FrequencyHeap, LfuNode};
pub use item::CacheItem;
pub use lfu::LfuCache;
pub use order_list::OrderList;
pub use ordered::{OrderMode, OrderedCache};
pub use policy::{EvictionPolicy, PolicyKind};
pub use random::RandomCache;
pub use stats::CacheStats;
pub use store::CacheStore;

/// A cache store behind the single lock that makes each operation atomic.
pub type SharedCacheStore = Arc<Mutex<CacheStore>>;

pub fn shared(store: CacheStore) -> SharedCacheStore {
    Arc::new(Mutex::new(store))
}
