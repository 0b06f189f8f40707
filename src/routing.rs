//! Replica Routing
//!
//! Picks which replica of a sharded service owns a logical key. Replica
//! numbers are 1-based.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{Result, WelpError};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a. Stable across processes, so hash routing survives restarts.
pub fn fnv1a_32(data: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in data {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

// == Routing Mode ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingMode {
    /// `fnv1a_32(key) % N + 1`
    Hash,
    /// First sighting takes the next replica round robin, then sticks
    Sequential,
    /// Everything goes to replica 1
    None,
}

impl RoutingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingMode::Hash => "hash",
            RoutingMode::Sequential => "sequential",
            RoutingMode::None => "none",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutingMode {
    type Err = WelpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(RoutingMode::Hash),
            "sequential" | "sticky" => Ok(RoutingMode::Sequential),
            "none" => Ok(RoutingMode::None),
            other => Err(WelpError::InvalidConfiguration(format!(
                "unknown load balancing mode: {}",
                other
            ))),
        }
    }
}

#[derive(Debug)]
struct StickyTable {
    assignments: HashMap<String, usize>,
    next: usize,
}

// == Replica Router ==
/// Routing state for one logical table (detail and review each own one).
#[derive(Debug)]
pub struct ReplicaRouter {
    mode: RoutingMode,
    replicas: usize,
    table: Mutex<StickyTable>,
}

impl ReplicaRouter {
    pub fn new(mode: RoutingMode, replicas: usize) -> Result<Self> {
        if replicas == 0 {
            return Err(WelpError::InvalidConfiguration(
                "replica count must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            mode,
            replicas,
            table: Mutex::new(StickyTable {
                assignments: HashMap::new(),
                next: 1,
            }),
        })
    }

    /// Returns the replica (in `1..=replicas`) that owns `key`.
    pub fn route(&self, key: &str) -> usize {
        match self.mode {
            RoutingMode::Hash => fnv1a_32(key.as_bytes()) as usize % self.replicas + 1,
            RoutingMode::None => 1,
            RoutingMode::Sequential => self.route_sticky(key),
        }
    }

    fn route_sticky(&self, key: &str) -> usize {
        // A poisoned table is still consistent: every update is a single insert.
        let mut table = self
            .table
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(&replica) = table.assignments.get(key) {
            return replica;
        }

        let replica = table.next;
        table.next = if replica >= self.replicas { 1 } else { replica + 1 };
        table.assignments.insert(key.to_string(), replica);
        debug!(key, replica, "assigned replica");
        replica
    }

    /// Number of keys with a sticky assignment.
    pub fn assigned(&self) -> usize {
        self.table
            .lock()
            .map(|table| table.assignments.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().assignments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_fnv1a_vectors() {
        assert_eq!(fnv1a_32(b""), 0x811c_9dc5);
        assert_eq!(fnv1a_32(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a_32(b"foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_hash_routing_is_deterministic() {
        let first = ReplicaRouter::new(RoutingMode::Hash, 3).unwrap();
        let second = ReplicaRouter::new(RoutingMode::Hash, 3).unwrap();

        for key in ["Nopa", "Zuni Cafe", "State Bird Provisions", ""] {
            let replica = first.route(key);
            assert!((1..=3).contains(&replica));
            assert_eq!(first.route(key), replica);
            assert_eq!(second.route(key), replica);
            assert_eq!(replica, fnv1a_32(key.as_bytes()) as usize % 3 + 1);
        }
        assert_eq!(first.assigned(), 0);
    }

    #[test]
    fn test_sequential_round_robin_then_sticky() {
        let router = ReplicaRouter::new(RoutingMode::Sequential, 3).unwrap();

        assert_eq!(router.route("a"), 1);
        assert_eq!(router.route("b"), 2);
        assert_eq!(router.route("c"), 3);
        assert_eq!(router.route("d"), 1);
        assert_eq!(router.route("b"), 2);
        assert_eq!(router.route("a"), 1);
        assert_eq!(router.assigned(), 4);
    }

    #[test]
    fn test_none_routes_to_first() {
        let router = ReplicaRouter::new(RoutingMode::None, 3).unwrap();
        assert!(["x", "y", "z"].iter().all(|k| router.route(k) == 1));
    }

    #[test]
    fn test_single_replica() {
        let router = ReplicaRouter::new(RoutingMode::Sequential, 1).unwrap();
        assert_eq!(router.route("a"), 1);
        assert_eq!(router.route("b"), 1);
    }

    #[test]
    fn test_zero_replicas_rejected() {
        assert!(matches!(
            ReplicaRouter::new(RoutingMode::Hash, 0),
            Err(WelpError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("HASH".parse::<RoutingMode>().unwrap(), RoutingMode::Hash);
        assert_eq!("sticky".parse::<RoutingMode>().unwrap(), RoutingMode::Sequential);
        assert_eq!("none".parse::<RoutingMode>().unwrap(), RoutingMode::None);
        assert!("random".parse::<RoutingMode>().is_err());
    }

    #[test]
    fn test_concurrent_first_sightings_agree() {
        let router = Arc::new(ReplicaRouter::new(RoutingMode::Sequential, 3).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let router = router.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|i| router.route(&format!("restaurant-{}", i)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<Vec<usize>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for result in &results[1..] {
            assert_eq!(result, &results[0]);
        }
        assert_eq!(router.assigned(), 50);

        // Round robin hands out every replica evenly across first sightings
        let used: HashSet<usize> = results[0].iter().copied().collect();
        assert_eq!(used, HashSet::from([1, 2, 3]));
        for replica in 1..=3 {
            let count = results[0].iter().filter(|&&r| r == replica).count();
            assert!((16..=17).contains(&count));
        }
    }
}
