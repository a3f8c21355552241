//! Category cache: by-id and by-name stores, "all categories" snapshot and
//! bounded search pages.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{
    CacheStats, CacheStatsReport, KeyedStore, SearchQuery, SearchResultCache, SharedClock,
    SnapshotCache, SystemClock,
};
use crate::config::CachePolicy;
use crate::facade::{CacheAdmin, CacheService, SearchCacheService};
use crate::models::{Category, CategoryId, Page};

// == Category Cache ==
#[derive(Debug)]
pub struct CategoryCache {
    by_id: KeyedStore<CategoryId, Category>,
    /// Keyed by trimmed, lowercased name
    by_name: KeyedStore<String, Category>,
    all: SnapshotCache<Category>,
    search: SearchResultCache<Page<Category>>,
    stats: Arc<CacheStats>,
}

impl CategoryCache {
    pub const NAME: &'static str = "categories";

    pub fn new(policy: &CachePolicy, clock: SharedClock) -> Self {
        let stats = CacheStats::shared();
        Self {
            by_id: KeyedStore::new(policy.ttl, clock.clone(), stats.clone()),
            // Name entries mirror id entries, so their expiries are not counted twice
            by_name: KeyedStore::new(policy.ttl, clock.clone(), CacheStats::shared()),
            all: SnapshotCache::new(policy.ttl, clock.clone(), stats.clone()),
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

    /// Case- and whitespace-insensitive lookup by category name.
    pub fn get_by_name(&self, name: &str) -> Option<Category> {
        let found = self.by_name.get(&Category::name_key(name));
        self.stats.record_lookup(found.is_some());
        found
    }

    pub fn get_all(&self) -> Option<Vec<Category>> {
        let found = self.all.get();
        self.stats.record_lookup(found.is_some());
        found
    }

    /// Replaces the snapshot, rebuilding both keyed stores first.
    pub fn put_all(&self, categories: Vec<Category>) {
        self.by_id.invalidate_all();
        self.by_name.invalidate_all();
        for category in &categories {
            self.store(category.clone());
        }
        debug!(count = categories.len(), "category snapshot replaced");
        self.all.store(categories);
    }

    pub fn invalidate_snapshot(&self) {
        self.all.invalidate();
    }

    fn store(&self, category: Category) {
        let id = category.id;
        let name_key = Category::name_key(&category.name);

        // A rename leaves the old name pointing at this id; drop it
        if let Some(previous) = self.by_id.put(id, category.clone()) {
            let previous_key = Category::name_key(&previous.name);
            if previous_key != name_key {
                self.by_name.invalidate_if(&previous_key, |held| held.id == id);
            }
        }
        self.by_name.put(name_key, category);
    }
}

impl CacheAdmin for CategoryCache {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn invalidate_by_id(&self, id: u64) {
        if let Some(removed) = self.by_id.invalidate(&id) {
            self.by_name
                .invalidate_if(&Category::name_key(&removed.name), |held| held.id == id);
        }
        self.all.invalidate();
        self.search.clear();
        debug!(category_id = id, "category invalidated, list views dropped");
    }

    fn invalidate_all(&self) {
        self.by_id.invalidate_all();
        self.by_name.invalidate_all();
        self.all.invalidate();
        self.search.clear();
        info!("all category cache invalidated");
    }

    fn stats(&self) -> CacheStatsReport {
        CacheStatsReport::new(
            Self::NAME,
            &self.stats,
            self.by_id.len(),
            self.search.len(),
            self.all.is_fresh(),
        )
    }

    fn reset_stats(&self) {
        self.stats.reset();
    }

    fn purge_expired(&self) -> usize {
        let expired = self.by_id.purge_expired().len();
        self.by_name.purge_expired();
        expired + self.search.purge_expired() + usize::from(self.all.purge_expired())
    }
}

impl CacheService for CategoryCache {
    type Value = Category;

    fn get_by_id(&self, id: u64) -> Option<Category> {
        let found = self.by_id.get(&id);
        self.stats.record_lookup(found.is_some());
        found
    }

    fn put(&self, category: Category) {
        self.store(category);
    }

    fn invalidate_all_list(&self) {
        self.all.invalidate();
        self.search.clear();
    }
}

impl SearchCacheService for CategoryCache {
    fn get_search_results(&self, query: &SearchQuery) -> Option<Page<Category>> {
        let found = self.search.get(&query.signature());
        self.stats.record_lookup(found.is_some());
        found
    }

    fn put_search_results(&self, query: &SearchQuery, page: Page<Category>) {
        let items = page.content.clone();
        self.search.put(query.signature(), page);
        for category in items {
            self.store(category);
        }
    }
}
