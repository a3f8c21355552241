//! Property-Based Tests for Cache Module
//!
//! Exercises the primitives with generated operation sequences on a manual
//! clock, so expiry is deterministic.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{
    CacheStats, KeyedStore, ManualClock, SearchQuery, SearchResultCache, SecondaryIndex,
};
use crate::config::CachePolicy;
use crate::facade::{
    CacheAdmin, CacheService, InventoryCache, ProductCache, SearchCacheService,
};
use crate::models::{Inventory, Page, Product};

// == Test Configuration ==
const TEST_TTL_SECS: u64 = 60;

fn store() -> (KeyedStore<u64, String>, Arc<ManualClock>) {
    let clock = ManualClock::shared();
    let store = KeyedStore::new(
        Duration::from_secs(TEST_TTL_SECS),
        clock.clone(),
        CacheStats::shared(),
    );
    (store, clock)
}

// == Strategies ==
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}"
}

/// Word lists joined with arbitrary whitespace and casing
fn spaced_words() -> impl Strategy<Value = (Vec<String>, String, String)> {
    prop::collection::vec("[a-z]{1,8}", 1..4).prop_flat_map(|words| {
        let n = words.len();
        (
            Just(words),
            prop::collection::vec("[ \t]{1,3}", n + 1),
            any::<bool>(),
        )
            .prop_map(|(words, gaps, upper)| {
                let mut messy = gaps[0].clone();
                for (i, word) in words.iter().enumerate() {
                    let word = if upper { word.to_uppercase() } else { word.clone() };
                    messy.push_str(&word);
                    messy.push_str(&gaps[i + 1]);
                }
                let clean = words.join(" ");
                (words, messy, clean)
            })
    })
}

#[derive(Debug, Clone)]
enum StoreOp {
    Put { key: u64, value: String },
    Get { key: u64 },
    Invalidate { key: u64 },
    Advance { secs: u64 },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (0u64..16, value_strategy()).prop_map(|(key, value)| StoreOp::Put { key, value }),
        (0u64..16).prop_map(|key| StoreOp::Get { key }),
        (0u64..16).prop_map(|key| StoreOp::Invalidate { key }),
        (0u64..45).prop_map(|secs| StoreOp::Advance { secs }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A put is readable for its whole TTL and gone one second after.
    #[test]
    fn prop_ttl_window(key in any::<u64>(), value in value_strategy(), within in 0u64..=TEST_TTL_SECS) {
        let (store, clock) = store();
        store.put(key, value.clone());

        clock.advance(Duration::from_secs(within));
        prop_assert_eq!(store.get(&key), Some(value));

        clock.advance(Duration::from_secs(TEST_TTL_SECS - within + 1));
        prop_assert_eq!(store.get(&key), None);
    }

    /// Invalidating twice leaves the same state as invalidating once.
    #[test]
    fn prop_invalidation_idempotent(keys in prop::collection::hash_set(0u64..64, 1..20), target in 0u64..64) {
        let (store, _) = store();
        for key in &keys {
            store.put(*key, key.to_string());
        }

        store.invalidate(&target);
        let after_once = store.len();
        prop_assert!(store.invalidate(&target).is_none());
        prop_assert_eq!(store.len(), after_once);
        prop_assert_eq!(after_once, keys.len() - usize::from(keys.contains(&target)));
    }

    /// Reads and hit/miss counters match a model that tracks expiry by hand.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let clock = ManualClock::shared();
        let cache = InventoryCache::new(&CachePolicy::new(TEST_TTL_SECS, 30, 10), clock.clone());
        let mut model: HashMap<u64, (i32, u64)> = HashMap::new();
        let mut now = 0u64;
        let (mut hits, mut misses) = (0u64, 0u64);

        for op in ops {
            match op {
                StoreOp::Put { key, value } => {
                    let quantity = value.len() as i32;
                    cache.put(Inventory::new(key, quantity));
                    model.insert(key, (quantity, now + TEST_TTL_SECS));
                }
                StoreOp::Get { key } => {
                    let expected = model
                        .get(&key)
                        .filter(|(_, expires)| now <= *expires)
                        .map(|(quantity, _)| *quantity);
                    if expected.is_some() { hits += 1 } else { misses += 1 }
                    prop_assert_eq!(cache.get_by_id(key).map(|i| i.quantity), expected);
                }
                StoreOp::Invalidate { key } => {
                    cache.invalidate_by_id(key);
                    model.remove(&key);
                }
                StoreOp::Advance { secs } => {
                    clock.advance(Duration::from_secs(secs));
                    now += secs;
                }
            }
        }

        let report = cache.stats();
        prop_assert_eq!(report.hits, hits);
        prop_assert_eq!(report.misses, misses);
    }

    /// The search cache never holds more pages than its capacity.
    #[test]
    fn prop_search_capacity_bound(capacity in 1usize..32, inserts in 1usize..120) {
        let clock = ManualClock::shared();
        let cache: SearchResultCache<usize> =
            SearchResultCache::new(capacity, Duration::from_secs(60), clock.clone(), CacheStats::shared());

        for i in 0..inserts {
            cache.put(format!("q{}|1|10|", i), i);
            clock.advance(Duration::from_millis(1));
            prop_assert!(cache.len() <= capacity);
        }
        // The newest page always survives
        prop_assert_eq!(cache.get(&format!("q{}|1|10|", inserts - 1)), Some(inserts - 1));
    }

    /// Case and whitespace differences do not change the signature.
    #[test]
    fn prop_signature_normalization((_, messy, clean) in spaced_words(), page in 0u32..50, size in 1u32..100) {
        let messy_query = SearchQuery::new(messy, page, size, " Price , ASC ");
        let clean_query = SearchQuery::new(clean.clone(), page, size, "price , asc");

        prop_assert_eq!(messy_query.signature(), clean_query.signature());
        let prefix = format!("{}|{}|{}|", clean, page, size);
        prop_assert!(messy_query.signature().starts_with(&prefix));
    }

    /// Index groups always equal the membership a plain map would hold.
    #[test]
    fn prop_index_consistency(moves in prop::collection::vec((0u64..20, 0u64..4), 1..60)) {
        let index: SecondaryIndex<u64, u64> = SecondaryIndex::new();
        let mut owner: HashMap<u64, u64> = HashMap::new();

        for (member, group) in moves {
            if let Some(previous) = owner.insert(member, group) {
                index.remove(&previous, &member);
            }
            index.add(group, member);
        }

        for group in 0u64..4 {
            let expected: HashSet<u64> = owner
                .iter()
                .filter(|(_, g)| **g == group)
                .map(|(m, _)| *m)
                .collect();
            prop_assert_eq!(index.get(&group), expected);
        }
        let live_groups: HashSet<u64> = owner.values().copied().collect();
        prop_assert_eq!(index.group_count(), live_groups.len());
    }
}

// == Concurrent Access ==
const CONCURRENT_SEARCH_CAPACITY: usize = 8;

#[derive(Debug, Clone)]
enum ConcurrentOp {
    PutSearch { query: u8, ids: Vec<u64> },
    Get { id: u64 },
    Invalidate { id: u64 },
}

fn concurrent_op_strategy() -> impl Strategy<Value = ConcurrentOp> {
    prop_oneof![
        (0u8..32, prop::collection::vec(0u64..12, 0..4))
            .prop_map(|(query, ids)| ConcurrentOp::PutSearch { query, ids }),
        (0u64..12).prop_map(|id| ConcurrentOp::Get { id }),
        (0u64..12).prop_map(|id| ConcurrentOp::Invalidate { id }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Interleaved writers and readers on one façade, with no caller
    /// locking, keep the search bound and count every lookup exactly once.
    #[test]
    fn prop_concurrent_facade_access(ops in prop::collection::vec(concurrent_op_strategy(), 10..80)) {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .build()
            .unwrap();

        rt.block_on(async {
            let policy = CachePolicy::new(300, 120, CONCURRENT_SEARCH_CAPACITY);
            let cache = Arc::new(ProductCache::new(&policy, ManualClock::shared()));
            let lookups = ops
                .iter()
                .filter(|op| matches!(op, ConcurrentOp::Get { .. }))
                .count() as u64;

            let mut handles = vec![];
            for op in ops {
                let cache = Arc::clone(&cache);
                handles.push(tokio::spawn(async move {
                    match op {
                        ConcurrentOp::PutSearch { query, ids } => {
                            let products: Vec<Product> = ids
                                .iter()
                                .map(|id| Product::new(*id, format!("item-{id}"), 1.0))
                                .collect();
                            let total = products.len() as u64;
                            cache.put_search_results(
                                &SearchQuery::new(format!("query {query}"), 1, 10, "id"),
                                Page::new(products, 1, 10, total),
                            );
                            Ok(())
                        }
                        ConcurrentOp::Get { id } => match cache.get_by_id(id) {
                            Some(product) if product.id != id => {
                                Err(format!("asked for {id}, got {}", product.id))
                            }
                            _ => Ok(()),
                        },
                        ConcurrentOp::Invalidate { id } => {
                            cache.invalidate_by_id(id);
                            Ok(())
                        }
                    }
                }));
            }

            for handle in handles {
                let result = handle.await.expect("task should not panic");
                prop_assert!(result.is_ok(), "concurrent operation failed: {:?}", result);
            }

            let report = cache.stats();
            prop_assert!(report.search_entries <= CONCURRENT_SEARCH_CAPACITY);
            prop_assert_eq!(report.hits + report.misses, lookups);
            Ok(())
        })?;
    }
}
