//! Inventory cache: by-id store and bounded search pages.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{
    CacheStats, CacheStatsReport, KeyedStore, SearchQuery, SearchResultCache, SharedClock,
    SystemClock,
};
use crate::config::CachePolicy;
use crate::facade::{CacheAdmin, CacheService, SearchCacheService};
use crate::models::{Inventory, InventoryId, Page};

// == Inventory Cache ==
#[derive(Debug)]
pub struct InventoryCache {
    by_id: KeyedStore<InventoryId, Inventory>,
    search: SearchResultCache<Page<Inventory>>,
    stats: Arc<CacheStats>,
}

impl InventoryCache {
    pub const NAME: &'static str = "inventory";

    pub fn new(policy: &CachePolicy, clock: SharedClock) -> Self {
        let stats = CacheStats::shared();
        Self {
            by_id: KeyedStore::new(policy.ttl, clock.clone(), stats.clone()),
            search: SearchResultCache::new(
                policy.search_capacity,
                policy.search_ttl,
                clock,
                stats.clone(),
            ),
            stats,
        }
    }

    pub fn with_system_clock(policy: &CachePolicy) -> Self {
        Self::new(policy, SystemClock::shared())
    }
}

impl CacheAdmin for InventoryCache {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn invalidate_by_id(&self, id: u64) {
        self.by_id.invalidate(&id);
        self.search.clear();
        debug!(inventory_id = id, "inventory invalidated, search pages dropped");
    }

    fn invalidate_all(&self) {
        self.by_id.invalidate_all();
        self.search.clear();
        info!("all inventory cache invalidated");
    }

    fn stats(&self) -> CacheStatsReport {
        CacheStatsReport::new(
            Self::NAME,
            &self.stats,
            self.by_id.len(),
            self.search.len(),
            false,
        )
    }

    fn reset_stats(&self) {
        self.stats.reset();
    }

    fn purge_expired(&self) -> usize {
        self.by_id.purge_expired().len() + self.search.purge_expired()
    }
}

impl CacheService for InventoryCache {
    type Value = Inventory;

    fn get_by_id(&self, id: u64) -> Option<Inventory> {
        let found = self.by_id.get(&id);
        self.stats.record_lookup(found.is_some());
        found
    }

    fn put(&self, inventory: Inventory) {
        self.by_id.put(inventory.id, inventory);
    }

    fn invalidate_all_list(&self) {
        self.search.clear();
    }
}

impl SearchCacheService for InventoryCache {
    fn get_search_results(&self, query: &SearchQuery) -> Option<Page<Inventory>> {
        let found = self.search.get(&query.signature());
        self.stats.record_lookup(found.is_some());
        found
    }

    fn put_search_results(&self, query: &SearchQuery, page: Page<Inventory>) {
        let items = page.content.clone();
        self.search.put(query.signature(), page);
        for inventory in items {
            self.by_id.put(inventory.id, inventory);
        }
    }
}
