//! Cache Statistics Module
//!
//! Tracks hit/miss accounting per façade plus eviction and expiry counts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

// == Cache Stats ==
/// Monotonic counters shared by a façade and its primitives.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of lookups that returned a value
    hits: AtomicU64,
    /// Number of lookups that returned nothing (absent or expired)
    misses: AtomicU64,
    /// Number of search entries removed by bulk eviction
    evictions: AtomicU64,
    /// Number of expired entries removed lazily or by the sweep
    expirations: AtomicU64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    // == Recording ==
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a hit when `found`, a miss otherwise.
    pub fn record_lookup(&self, found: bool) {
        if found {
            self.record_hit();
        } else {
            self.record_miss();
        }
    }

    pub fn record_evictions(&self, count: u64) {
        self.evictions.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_expiration(&self) {
        self.expirations.fetch_add(1, Ordering::Relaxed);
    }

    // == Accessors ==
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    pub fn expirations(&self) -> u64 {
        self.expirations.load(Ordering::Relaxed)
    }

    // == Hit Rate ==
    /// Hit rate as a percentage, `hits / (hits + misses) * 100`.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        hit_rate_percent(self.hits(), self.misses())
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.expirations.store(0, Ordering::Relaxed);
    }
}

fn hit_rate_percent(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}

// == Stats Report ==
/// Point-in-time view of one façade, as exposed on `/stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatsReport {
    /// Façade name (`products`, `categories`, `inventory`)
    pub cache: String,
    pub hits: u64,
    pub misses: u64,
    /// Percentage in `0.0..=100.0`
    pub hit_rate: f64,
    /// Resident per-id entries
    pub entries: usize,
    /// Resident search pages
    pub search_entries: usize,
    /// Whether a fresh "list all" snapshot is held
    pub snapshot_cached: bool,
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheStatsReport {
    /// Builds a report from the live counters and the façade's sizes.
    pub fn new(
        cache: impl Into<String>,
        stats: &CacheStats,
        entries: usize,
        search_entries: usize,
        snapshot_cached: bool,
    ) -> Self {
        let hits = stats.hits();
        let misses = stats.misses();
        Self {
            cache: cache.into(),
            hits,
            misses,
            hit_rate: hit_rate_percent(hits, misses),
            entries,
            search_entries,
            snapshot_cached,
            evictions: stats.evictions(),
            expirations: stats.expirations(),
        }
    }
}
