//! TTL Entry Module
//!
//! Defines the immutable unit of freshness stored by every cache primitive.

use std::time::{Duration, Instant};

// == TTL Entry ==
/// A cached value paired with its absolute expiry instant.
///
/// Entries are never mutated; an overwrite replaces the whole entry.
#[derive(Debug, Clone)]
pub struct TtlEntry<V> {
    /// The stored value
    value: V,
    /// Instant the entry was written
    created_at: Instant,
    /// Instant after which the entry is stale
    expires_at: Instant,
}

/// Builds an entry that expires `ttl` after `now`.
pub fn new_entry<V>(value: V, ttl: Duration, now: Instant) -> TtlEntry<V> {
    TtlEntry {
        value,
        created_at: now,
        expires_at: now + ttl,
    }
}

impl<V> TtlEntry<V> {
    // == Accessors ==
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    // == Is Expired ==
    /// Returns true once `now` is strictly past the expiry instant.
    ///
    /// An entry read exactly at `expires_at` is still fresh.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime at `now`, zero once expired.
    pub fn ttl_remaining_at(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}
