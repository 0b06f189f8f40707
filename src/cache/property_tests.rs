//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store contract across every eviction policy.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::{CacheItem, CacheStore, PolicyKind};

// == Test Configuration ==
const TEST_CAPACITY: usize = 100;

// == Strategies ==
/// Generates valid cache keys (non-empty, within length limit)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}".prop_map(|s| s)
}

/// Generates arbitrary binary payloads
fn valid_value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

fn policy_strategy() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

/// Generates distinct keys, at least `min` of them
fn unique_keys(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(valid_key_strategy(), min..max)
        .prop_map(|set| set.into_iter().collect())
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Vec<u8> },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    // Small key space so operations collide
    let key = "[a-h]";
    prop_oneof![
        (key, valid_value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key.prop_map(|key| CacheOp::Get { key }),
        key.prop_map(|key| CacheOp::Delete { key }),
    ]
}

fn set(store: &mut CacheStore, key: &str, value: Vec<u8>) {
    store.set(CacheItem::new(key, value));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* policy and operation sequence, the store never holds more than
    // its capacity, and stats reflect every lookup.
    #[test]
    fn prop_capacity_and_stats(
        kind in policy_strategy(),
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut store = CacheStore::new(kind, capacity).unwrap();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => set(&mut store, &key, value),
                CacheOp::Get { key } => match store.get(&key) {
                    Ok(_) => expected_hits += 1,
                    Err(_) => expected_misses += 1,
                },
                CacheOp::Delete { key } => {
                    let _ = store.delete(&key);
                }
            }
            prop_assert!(
                store.len() <= capacity,
                "{} store holds {} entries, capacity {}",
                kind,
                store.len(),
                capacity
            );
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }

    // *For any* item, set then get returns it byte-for-byte.
    #[test]
    fn prop_roundtrip_storage(
        kind in policy_strategy(),
        key in valid_key_strategy(),
        value in valid_value_strategy()
    ) {
        let mut store = CacheStore::new(kind, TEST_CAPACITY).unwrap();
        let item = CacheItem::new(key.clone(), value);

        store.set(item.clone());
        prop_assert_eq!(store.get(&key).unwrap(), item);
    }

    // *For any* live key, delete makes a subsequent get miss.
    #[test]
    fn prop_delete_removes_entry(
        kind in policy_strategy(),
        key in valid_key_strategy(),
        value in valid_value_strategy()
    ) {
        let mut store = CacheStore::new(kind, TEST_CAPACITY).unwrap();
        set(&mut store, &key, value);

        store.delete(&key).unwrap();
        prop_assert!(store.get(&key).is_err(), "Key should not exist after delete");
        prop_assert!(store.delete(&key).is_err(), "Second delete should miss");
    }

    // *For any* key, the last write wins and only one entry exists.
    #[test]
    fn prop_overwrite_semantics(
        kind in policy_strategy(),
        key in valid_key_strategy(),
        value1 in valid_value_strategy(),
        value2 in valid_value_strategy()
    ) {
        let mut store = CacheStore::new(kind, TEST_CAPACITY).unwrap();
        set(&mut store, &key, value1);
        set(&mut store, &key, value2.clone());

        prop_assert_eq!(store.get(&key).unwrap().value, value2);
        prop_assert_eq!(store.len(), 1);
    }

    // FIFO evicts the first inserted key no matter which keys were read.
    #[test]
    fn prop_fifo_eviction_order(
        keys in unique_keys(2, 10),
        reads in prop::collection::vec(0usize..100, 0..20),
        new_key in valid_key_strategy()
    ) {
        prop_assume!(!keys.contains(&new_key));

        let mut store = CacheStore::new(PolicyKind::Fifo, keys.len()).unwrap();
        for key in &keys {
            set(&mut store, key, key.as_bytes().to_vec());
        }
        for r in reads {
            let _ = store.get(&keys[r % keys.len()]);
        }

        set(&mut store, &new_key, vec![1]);
        prop_assert!(store.get(&keys[0]).is_err(), "First inserted key should be evicted");
        for key in keys.iter().skip(1) {
            prop_assert!(store.get(key).is_ok(), "Key '{}' should survive", key);
        }
    }

    // LRU evicts the least recently accessed key; a touched key survives.
    #[test]
    fn prop_lru_access_tracking(
        keys in unique_keys(3, 8),
        new_key in valid_key_strategy()
    ) {
        prop_assume!(!keys.contains(&new_key));

        let mut store = CacheStore::new(PolicyKind::Lru, keys.len()).unwrap();
        for key in &keys {
            set(&mut store, key, key.as_bytes().to_vec());
        }

        // Touch the oldest so the second key becomes the victim
        store.get(&keys[0]).unwrap();
        set(&mut store, &new_key, vec![1]);

        prop_assert!(store.get(&keys[0]).is_ok(), "Accessed key should survive");
        prop_assert!(store.get(&keys[1]).is_err(), "Second key should be evicted");
    }

    // MRU evicts exactly the key accessed last.
    #[test]
    fn prop_mru_evicts_last_access(
        keys in unique_keys(2, 8),
        touched in 0usize..100,
        new_key in valid_key_strategy()
    ) {
        prop_assume!(!keys.contains(&new_key));

        let mut store = CacheStore::new(PolicyKind::Mru, keys.len()).unwrap();
        for key in &keys {
            set(&mut store, key, key.as_bytes().to_vec());
        }

        let victim = &keys[touched % keys.len()];
        store.get(victim).unwrap();
        set(&mut store, &new_key, vec![1]);

        let survivors: HashSet<&String> =
            keys.iter().filter(|k| *k != victim).collect();
        prop_assert!(store.get(victim).is_err(), "Last accessed key should be evicted");
        for key in survivors {
            prop_assert!(store.get(key).is_ok(), "Key '{}' should survive", key);
        }
    }

    // LFU evicts a key whose count is strictly lowest.
    #[test]
    fn prop_lfu_evicts_coldest(
        keys in unique_keys(2, 8),
        cold in 0usize..100,
        new_key in valid_key_strategy()
    ) {
        prop_assume!(!keys.contains(&new_key));

        let mut store = CacheStore::new(PolicyKind::Lfu, keys.len()).unwrap();
        for key in &keys {
            set(&mut store, key, key.as_bytes().to_vec());
        }

        let cold_key = keys[cold % keys.len()].clone();
        for key in keys.iter().filter(|k| **k != cold_key) {
            store.get(key).unwrap();
        }
        set(&mut store, &new_key, vec![1]);

        prop_assert!(store.get(&cold_key).is_err(), "Coldest key should be evicted");
        prop_assert_eq!(store.len(), keys.len());
    }
}
