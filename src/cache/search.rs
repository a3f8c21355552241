//! Search Result Cache Module
//!
//! Caches result pages under a normalized search signature. The map is
//! bounded: an insert into a full cache first drops the oldest quarter of
//! the entries, ranked by creation time. Reads do no bookkeeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{new_entry, CacheStats, SharedClock, TtlEntry};

/// Separator between signature components.
const SIGNATURE_DELIMITER: char = '|';

// == Search Query ==
/// Free-text query plus paging and sort parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    query: String,
    page: u32,
    size: u32,
    sort: String,
    filters: Vec<(String, String)>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, page: u32, size: u32, sort: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page,
            size,
            sort: sort.into(),
            filters: Vec::new(),
        }
    }

    /// Adds a named filter that takes part in the signature.
    pub fn with_filter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((name.into(), value.to_string()));
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> &str {
        &self.sort
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    // == Signature ==
    /// Normalized cache key for this query.
    ///
    /// Query text and sort spec are trimmed, lowercased and have inner
    /// whitespace runs collapsed, so `"  Gaming  Laptop "` and
    /// `"gaming laptop"` share one signature.
    pub fn signature(&self) -> String {
        let mut signature = format!(
            "{query}{d}{page}{d}{size}{d}{sort}",
            query = normalize(&self.query),
            page = self.page,
            size = self.size,
            sort = normalize(&self.sort),
            d = SIGNATURE_DELIMITER,
        );
        for (name, value) in &self.filters {
            signature.push(SIGNATURE_DELIMITER);
            signature.push_str(&normalize(name));
            signature.push('=');
            signature.push_str(&normalize(value));
        }
        signature
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

// == Search Entry ==
#[derive(Debug)]
struct SearchEntry<P> {
    entry: TtlEntry<P>,
    /// Insertion order, breaks ties between entries created at the same instant
    sequence: u64,
}

// == Search Result Cache ==
/// Bounded TTL cache keyed by search signature.
#[derive(Debug)]
pub struct SearchResultCache<P> {
    entries: DashMap<String, SearchEntry<P>>,
    capacity: usize,
    ttl: Duration,
    sequence: AtomicU64,
    /// Serializes evict+insert so the capacity bound holds under contention
    insert_guard: Mutex<()>,
    clock: SharedClock,
    stats: Arc<CacheStats>,
}

impl<P: Clone> SearchResultCache<P> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` pages (minimum 1).
    pub fn new(
        capacity: usize,
        ttl: Duration,
        clock: SharedClock,
        stats: Arc<CacheStats>,
    ) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
            ttl,
            sequence: AtomicU64::new(0),
            insert_guard: Mutex::new(()),
            clock,
            stats,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries removed by one bulk eviction.
    pub fn eviction_batch(&self) -> usize {
        (self.capacity / 4).max(1)
    }

    // == Get ==
    /// Returns the page cached under `signature` unless absent or expired.
    pub fn get(&self, signature: &str) -> Option<P> {
        let now = self.clock.now();
        if let Some(found) = self.entries.get(signature) {
            if !found.entry.is_expired_at(now) {
                return Some(found.entry.value().clone());
            }
        } else {
            return None;
        }

        if self
            .entries
            .remove_if(signature, |_, found| found.entry.is_expired_at(now))
            .is_some()
        {
            self.stats.record_expiration();
        }
        None
    }

    // == Put ==
    /// Inserts or overwrites the page for `signature`.
    ///
    /// A put into a full cache evicts the oldest `capacity / 4` entries
    /// first, even when `signature` is already present. Returns the number
    /// evicted.
    pub fn put(&self, signature: String, page: P) -> usize {
        let _guard = self.insert_guard.lock();

        let mut evicted = 0;
        if self.entries.len() >= self.capacity {
            evicted = self.evict_oldest(self.eviction_batch());
        }

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let entry = new_entry(page, self.ttl, self.clock.now());
        self.entries.insert(signature, SearchEntry { entry, sequence });
        evicted
    }

    /// Removes the `count` entries with the earliest creation time.
    fn evict_oldest(&self, count: usize) -> usize {
        let mut ranked: Vec<(Instant, u64, String)> = self
            .entries
            .iter()
            .map(|item| {
                (
                    item.value().entry.created_at(),
                    item.value().sequence,
                    item.key().clone(),
                )
            })
            .collect();
        ranked.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let evicted = ranked
            .into_iter()
            .take(count)
            .filter(|(_, _, key)| self.entries.remove(key).is_some())
            .count();

        self.stats.record_evictions(evicted as u64);
        debug!(
            evicted,
            capacity = self.capacity,
            "search cache full, evicted oldest entries"
        );
        evicted
    }

    // == Clear ==
    /// Drops every cached page.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Removes expired pages and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries
            .retain(|_, found| !found.entry.is_expired_at(now));
        let removed = before.saturating_sub(self.entries.len());
        for _ in 0..removed {
            self.stats.record_expiration();
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
