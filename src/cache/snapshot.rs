//! Snapshot Cache Module
//!
//! Holds one materialized "list all" result per entity type.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::cache::{new_entry, CacheStats, SharedClock, TtlEntry};

// == Snapshot Cache ==
/// Single TTL-gated slot holding the full entity list.
///
/// Only the slot is managed here; façades are responsible for refreshing
/// their keyed stores and indices before calling [`SnapshotCache::store`].
#[derive(Debug)]
pub struct SnapshotCache<V> {
    slot: RwLock<Option<TtlEntry<Vec<V>>>>,
    ttl: Duration,
    clock: SharedClock,
    stats: Arc<CacheStats>,
}

impl<V: Clone> SnapshotCache<V> {
    pub fn new(ttl: Duration, clock: SharedClock, stats: Arc<CacheStats>) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
            clock,
            stats,
        }
    }

    // == Get ==
    /// Returns the snapshot unless it was never stored or has expired.
    pub fn get(&self) -> Option<Vec<V>> {
        let now = self.clock.now();
        {
            let slot = self.slot.read();
            match slot.as_ref() {
                None => return None,
                Some(entry) if !entry.is_expired_at(now) => return Some(entry.value().clone()),
                Some(_) => {}
            }
        }

        let mut slot = self.slot.write();
        if slot.as_ref().is_some_and(|entry| entry.is_expired_at(now)) {
            *slot = None;
            self.stats.record_expiration();
        }
        None
    }

    /// True while a non-expired snapshot is held.
    pub fn is_fresh(&self) -> bool {
        let now = self.clock.now();
        self.slot
            .read()
            .as_ref()
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Store ==
    /// Replaces the snapshot with `values`, resetting its TTL.
    pub fn store(&self, values: Vec<V>) {
        let entry = new_entry(values, self.ttl, self.clock.now());
        *self.slot.write() = Some(entry);
    }

    // == Invalidate ==
    /// Drops the snapshot; per-id entries elsewhere are untouched.
    pub fn invalidate(&self) {
        *self.slot.write() = None;
    }

    /// Drops the snapshot if it has expired. Returns true if one was dropped.
    pub fn purge_expired(&self) -> bool {
        let now = self.clock.now();
        let mut slot = self.slot.write();
        if slot.as_ref().is_some_and(|entry| entry.is_expired_at(now)) {
            *slot = None;
            self.stats.record_expiration();
            true
        } else {
            false
        }
    }
}
