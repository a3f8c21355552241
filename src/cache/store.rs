//! Keyed Store Module
//!
//! Concurrent map from a single-entity key to a TTL entry. Expiry is lazy:
//! stale entries stay resident until the next read, overwrite, invalidation
//! or sweep touches them.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::cache::{new_entry, CacheStats, SharedClock, TtlEntry};

// == Lookup ==
/// Outcome of a keyed read.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<V> {
    Fresh(V),
    /// The entry had expired and this read removed it
    Expired(V),
    Absent,
}

impl<V> Lookup<V> {
    pub fn fresh(self) -> Option<V> {
        match self {
            Lookup::Fresh(value) => Some(value),
            Lookup::Expired(_) | Lookup::Absent => None,
        }
    }
}

// == Keyed Store ==
/// TTL-gated concurrent key/value store.
#[derive(Debug)]
pub struct KeyedStore<K, V>
where
    K: Eq + Hash,
{
    /// Key-value storage
    entries: DashMap<K, TtlEntry<V>>,
    /// TTL applied by `put`
    ttl: Duration,
    clock: SharedClock,
    stats: Arc<CacheStats>,
}

impl<K, V> KeyedStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration, clock: SharedClock, stats: Arc<CacheStats>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
            stats,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Put ==
    /// Stores `value` under `key` with the store's TTL.
    ///
    /// Returns the value previously held under `key`, fresh or not.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.put_with_ttl(key, value, self.ttl)
    }

    /// Stores `value` under `key`, expiring after `ttl`.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) -> Option<V> {
        let entry = new_entry(value, ttl, self.clock.now());
        self.entries.insert(key, entry).map(TtlEntry::into_value)
    }

    // == Get ==
    /// Returns the value for `key` unless it is absent or expired.
    ///
    /// An expired entry is removed as a side effect.
    pub fn get(&self, key: &K) -> Option<V> {
        self.lookup(key).fresh()
    }

    /// Like [`KeyedStore::get`], but hands back a value this read expired so
    /// callers can unwind state derived from it.
    pub fn lookup(&self, key: &K) -> Lookup<V> {
        let now = self.clock.now();
        {
            let Some(entry) = self.entries.get(key) else {
                return Lookup::Absent;
            };
            if !entry.is_expired_at(now) {
                return Lookup::Fresh(entry.value().value().clone());
            }
        }

        // Only drop the entry if it is still the expired one; a racing put wins.
        match self
            .entries
            .remove_if(key, |_, entry| entry.is_expired_at(now))
        {
            Some((_, entry)) => {
                self.stats.record_expiration();
                Lookup::Expired(entry.into_value())
            }
            None => Lookup::Absent,
        }
    }

    // == Peek ==
    /// Returns the resident value for `key` without checking expiry.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().value().clone())
    }

    // == Invalidate ==
    /// Removes `key` unconditionally, returning the removed value.
    ///
    /// Removing a missing key is a no-op.
    pub fn invalidate(&self, key: &K) -> Option<V> {
        self.entries
            .remove(key)
            .map(|(_, entry)| entry.into_value())
    }

    /// Removes `key` only if its resident value satisfies `predicate`.
    pub fn invalidate_if(&self, key: &K, predicate: impl FnOnce(&V) -> bool) -> Option<V> {
        self.entries
            .remove_if(key, |_, entry| predicate(entry.value()))
            .map(|(_, entry)| entry.into_value())
    }

    /// Clears every entry.
    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns what was removed.
    pub fn purge_expired(&self) -> Vec<(K, V)> {
        let now = self.clock.now();
        let mut removed = Vec::new();
        self.entries.retain(|key, entry| {
            if entry.is_expired_at(now) {
                removed.push((key.clone(), entry.value().clone()));
                false
            } else {
                true
            }
        });
        for _ in &removed {
            self.stats.record_expiration();
        }
        removed
    }

    // == Length ==
    /// Number of resident entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
