//! Cache Façades
//!
//! One cache per entity type, composed from the primitives in
//! [`crate::cache`]. A façade never talks to the backing store: a lookup
//! either hits or reports absence, and callers put fetched data back and
//! invalidate after writes.
//!
//! | Trigger | Effect |
//! |---|---|
//! | `put` | keyed store entry, index membership |
//! | `put_all` | clear + repopulate keyed store and index, then store snapshot |
//! | `invalidate_by_id` | drop entry and membership, drop snapshot, clear search cache |
//! | `invalidate_all_list` | drop snapshot, clear search cache |
//! | `invalidate_all` | clear everything except statistics |

mod category;
mod inventory;
mod product;

use std::sync::Arc;

use crate::cache::{CacheStatsReport, SearchQuery, SharedClock, SystemClock};
use crate::config::Config;
use crate::models::Page;

pub use category::CategoryCache;
pub use inventory::InventoryCache;
pub use product::ProductCache;

// == Cache Registry ==
/// The one-per-process set of façades, built by the composition root and
/// handed to whoever needs it.
#[derive(Debug, Clone)]
pub struct CacheRegistry {
    pub products: Arc<ProductCache>,
    pub categories: Arc<CategoryCache>,
    pub inventory: Arc<InventoryCache>,
}

impl CacheRegistry {
    pub fn new(config: &Config, clock: SharedClock) -> Self {
        Self {
            products: Arc::new(ProductCache::new(&config.product, clock.clone())),
            categories: Arc::new(CategoryCache::new(&config.category, clock.clone())),
            inventory: Arc::new(InventoryCache::new(&config.inventory, clock)),
        }
    }

    /// Builds every façade on the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config, SystemClock::shared())
    }

    /// Looks a façade up by its [`CacheAdmin::name`].
    pub fn get(&self, name: &str) -> Option<&dyn CacheAdmin> {
        self.all().into_iter().find(|cache| cache.name() == name)
    }

    pub fn all(&self) -> [&dyn CacheAdmin; 3] {
        [
            self.products.as_ref(),
            self.categories.as_ref(),
            self.inventory.as_ref(),
        ]
    }
}

// == Cache Admin ==
/// Type-erased maintenance surface shared by every façade.
///
/// Used by the ops API and the background sweep, which handle all façades
/// uniformly.
pub trait CacheAdmin: Send + Sync {
    /// Stable façade name, used in stats reports and API paths.
    fn name(&self) -> &'static str;

    /// Drops one entity and every list view that may contain it.
    fn invalidate_by_id(&self, id: u64);

    /// Clears all state. Statistics are kept.
    fn invalidate_all(&self);

    fn stats(&self) -> CacheStatsReport;

    fn reset_stats(&self);

    /// Removes expired entries from every primitive, returning the count.
    fn purge_expired(&self) -> usize;
}

// == Cache Service ==
/// Per-id read/write contract of a façade.
pub trait CacheService: CacheAdmin {
    type Value: Clone;

    /// Returns the cached entity, recording a hit or a miss.
    fn get_by_id(&self, id: u64) -> Option<Self::Value>;

    /// Caches one entity fetched from the store.
    fn put(&self, value: Self::Value);

    /// Drops every list-shaped view while keeping per-id entries.
    fn invalidate_all_list(&self);
}

// == Search Cache Service ==
/// Paged search contract of a façade.
pub trait SearchCacheService: CacheService {
    /// Returns the cached page for `query`, recording a hit or a miss.
    fn get_search_results(&self, query: &SearchQuery) -> Option<Page<Self::Value>>;

    /// Caches a page and warms the per-id entries of its items.
    fn put_search_results(&self, query: &SearchQuery, page: Page<Self::Value>);
}
