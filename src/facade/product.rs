//! Product cache: by-id store, by-category index, "all products" snapshot
//! and bounded search pages.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{
    CacheStats, CacheStatsReport, KeyedStore, Lookup, SearchQuery, SearchResultCache,
    SecondaryIndex, SharedClock, SnapshotCache, SystemClock,
};
use crate::config::CachePolicy;
use crate::facade::{CacheAdmin, CacheService, SearchCacheService};
use crate::models::{CategoryId, Page, Product, ProductId};

// == Product Cache ==
#[derive(Debug)]
pub struct ProductCache {
    by_id: KeyedStore<ProductId, Product>,
    by_category: SecondaryIndex<CategoryId, ProductId>,
    all: SnapshotCache<Product>,
    search: SearchResultCache<Page<Product>>,
    stats: Arc<CacheStats>,
}

impl ProductCache {
    pub const NAME: &'static str = "products";

    // == Constructor ==
    pub fn new(policy: &CachePolicy, clock: SharedClock) -> Self {
        let stats = CacheStats::shared();
        Self {
            by_id: KeyedStore::new(policy.ttl, clock.clone(), stats.clone()),
            by_category: SecondaryIndex::new(),
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

    // == Snapshot ==
    /// Returns the full product list if a fresh snapshot is held.
    pub fn get_all(&self) -> Option<Vec<Product>> {
        let found = self.all.get();
        self.stats.record_lookup(found.is_some());
        found
    }

    /// Replaces the snapshot with `products`.
    ///
    /// The by-id store and the category index are cleared and rebuilt from
    /// `products` before the snapshot itself is stored. Concurrent readers may
    /// see a partially rebuilt store in between; those reads are misses.
    pub fn put_all(&self, products: Vec<Product>) {
        self.by_id.invalidate_all();
        self.by_category.clear();
        for product in &products {
            self.store(product.clone());
        }
        debug!(count = products.len(), "product snapshot replaced");
        self.all.store(products);
    }

    /// Drops only the snapshot.
    pub fn invalidate_snapshot(&self) {
        self.all.invalidate();
    }

    // == Category Index ==
    /// Ids currently indexed under `category_id`.
    pub fn category_members(&self, category_id: CategoryId) -> HashSet<ProductId> {
        self.by_category.get(&category_id)
    }

    /// All products of a category, answered from the index.
    ///
    /// The index is only known to be complete while the snapshot is fresh,
    /// so this is a miss otherwise, or when any member has left the store.
    pub fn get_by_category(&self, category_id: CategoryId) -> Option<Vec<Product>> {
        let found = self.resolve_category(category_id);
        self.stats.record_lookup(found.is_some());
        found
    }

    fn resolve_category(&self, category_id: CategoryId) -> Option<Vec<Product>> {
        if !self.all.is_fresh() {
            return None;
        }
        let mut products = self
            .category_members(category_id)
            .iter()
            .map(|id| self.fresh(*id))
            .collect::<Option<Vec<_>>>()?;
        products.sort_by_key(|product| product.id);
        Some(products)
    }

    // == Internal Helpers ==
    /// Reads one product, dropping the index membership of an entry this
    /// read expired.
    fn fresh(&self, id: ProductId) -> Option<Product> {
        match self.by_id.lookup(&id) {
            Lookup::Fresh(product) => Some(product),
            Lookup::Expired(product) => {
                if let Some(group) = product.category_id() {
                    self.by_category.remove(&group, &id);
                }
                None
            }
            Lookup::Absent => None,
        }
    }

    /// Writes one product to the store and moves its index membership.
    fn store(&self, product: Product) {
        let id = product.id;
        let group = product.category_id();

        let previous_group = self
            .by_id
            .put(id, product)
            .and_then(|previous| previous.category_id());
        if let Some(previous_group) = previous_group.filter(|g| Some(*g) != group) {
            self.by_category.remove(&previous_group, &id);
        }
        if let Some(group) = group {
            self.by_category.add(group, id);
        }
    }
}

impl CacheAdmin for ProductCache {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn invalidate_by_id(&self, id: u64) {
        if let Some(group) = self.by_id.invalidate(&id).and_then(|p| p.category_id()) {
            self.by_category.remove(&group, &id);
        }
        self.all.invalidate();
        self.search.clear();
        debug!(product_id = id, "product invalidated, list views dropped");
    }

    fn invalidate_all(&self) {
        self.by_id.invalidate_all();
        self.by_category.clear();
        self.all.invalidate();
        self.search.clear();
        info!("all product cache invalidated");
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
        let expired = self.by_id.purge_expired();
        for (id, product) in &expired {
            if let Some(group) = product.category_id() {
                self.by_category.remove(&group, id);
            }
        }
        expired.len() + self.search.purge_expired() + usize::from(self.all.purge_expired())
    }
}

impl CacheService for ProductCache {
    type Value = Product;

    fn get_by_id(&self, id: u64) -> Option<Product> {
        let found = self.fresh(id);
        self.stats.record_lookup(found.is_some());
        found
    }

    fn put(&self, product: Product) {
        self.store(product);
    }

    fn invalidate_all_list(&self) {
        self.all.invalidate();
        self.search.clear();
    }
}

impl SearchCacheService for ProductCache {
    fn get_search_results(&self, query: &SearchQuery) -> Option<Page<Product>> {
        let found = self.search.get(&query.signature());
        self.stats.record_lookup(found.is_some());
        found
    }

    fn put_search_results(&self, query: &SearchQuery, page: Page<Product>) {
        let items = page.content.clone();
        self.search.put(query.signature(), page);
        for product in items {
            self.store(product);
        }
    }
}
