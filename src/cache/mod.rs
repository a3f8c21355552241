//! Cache Module
//!
//! Shared in-memory primitives the entity façades are built from: TTL
//! entries, keyed stores, secondary indices, snapshot slots, bounded search
//! caches and hit/miss statistics.

mod clock;
mod entry;
mod index;
mod search;
mod snapshot;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use entry::{new_entry, TtlEntry};
pub use index::SecondaryIndex;
pub use search::{SearchQuery, SearchResultCache};
pub use snapshot::SnapshotCache;
pub use stats::{CacheStats, CacheStatsReport};
pub use store::{KeyedStore, Lookup};

// == Public Constants ==
/// Default number of search pages held per façade
pub const DEFAULT_SEARCH_CAPACITY: usize = 100;
