//! Eviction Policy Module
//!
//! The container contract every policy implements, and policy selection by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheItem, LfuCache, OrderMode, OrderedCache, RandomCache};
use crate::error::WelpError;

// == Policy Kind ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Fifo,
    Random,
    Lru,
    Mru,
    Lfu,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Fifo,
        PolicyKind::Random,
        PolicyKind::Lru,
        PolicyKind::Mru,
        PolicyKind::Lfu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Random => "random",
            PolicyKind::Lru => "lru",
            PolicyKind::Mru => "mru",
            PolicyKind::Lfu => "lfu",
        }
    }

    /// Creates an empty container for this policy.
    pub fn build(&self) -> Box<dyn EvictionPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(OrderedCache::new(OrderMode::Fifo)),
            PolicyKind::Lru => Box::new(OrderedCache::new(OrderMode::Lru)),
            PolicyKind::Mru => Box::new(OrderedCache::new(OrderMode::Mru)),
            PolicyKind::Random => Box::new(RandomCache::new()),
            PolicyKind::Lfu => Box::new(LfuCache::new()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = WelpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| {
                WelpError::InvalidConfiguration(format!("unknown eviction policy: {}", s))
            })
    }
}

// == Eviction Policy ==
/// Unbounded key-value container with an eviction hook.
///
/// Capacity is enforced by `CacheStore`, which calls `evict` before `put`ting
/// a new key into a full container. Implementations are not synchronized.
pub trait EvictionPolicy: Send + fmt::Debug {
    fn len(&self) -> usize;

    fn contains(&self, key: &str) -> bool;

    /// Looks up a key, recording the access for recency/frequency policies.
    fn get(&mut self, key: &str) -> Option<&CacheItem>;

    /// Inserts a new key or overwrites an existing one.
    fn put(&mut self, item: CacheItem);

    fn remove(&mut self, key: &str) -> Option<CacheItem>;

    /// Removes and returns the entry this policy would evict next.
    fn evict(&mut self) -> Option<CacheItem>;

    fn clear(&mut self);
}
