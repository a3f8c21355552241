//! Catalog Read-Through
//!
//! Wires the façades to a backing store using cache-aside: ask the cache,
//! on a miss fetch from the store and hand the result back to the cache.
//! Concurrent misses for the same key are not collapsed; each caller goes to
//! the store and the last `put` wins.
//!
//! Writes happen in the store, outside this module. Whoever performs a write
//! must call the matching `*_saved` / `*_deleted` notification, otherwise the
//! caches keep serving the old data until their TTLs run out.

mod memory;

use tracing::debug;

use crate::cache::SearchQuery;
use crate::error::Result;
use crate::facade::{CacheAdmin, CacheRegistry, CacheService, SearchCacheService};
use crate::models::{Category, CategoryId, Inventory, InventoryId, Page, Product, ProductId};

pub use memory::MemoryCatalog;

// == Catalog Source ==
/// Backing read path, consulted only on cache misses.
pub trait CatalogSource: Send + Sync {
    fn fetch_product(&self, id: ProductId) -> Result<Product>;
    fn fetch_products(&self) -> Result<Vec<Product>>;
    fn search_products(&self, query: &SearchQuery) -> Result<Page<Product>>;

    fn fetch_category(&self, id: CategoryId) -> Result<Category>;
    fn fetch_category_by_name(&self, name: &str) -> Result<Category>;
    fn fetch_categories(&self) -> Result<Vec<Category>>;
    fn search_categories(&self, query: &SearchQuery) -> Result<Page<Category>>;

    fn fetch_inventory(&self, id: InventoryId) -> Result<Inventory>;
    fn search_inventory(&self, query: &SearchQuery) -> Result<Page<Inventory>>;
}

// == Cached Catalog ==
/// Cache-aside view over a [`CatalogSource`].
#[derive(Debug)]
pub struct CachedCatalog<S> {
    source: S,
    caches: CacheRegistry,
}

impl<S: CatalogSource> CachedCatalog<S> {
    pub fn new(source: S, caches: CacheRegistry) -> Self {
        Self { source, caches }
    }

    pub fn caches(&self) -> &CacheRegistry {
        &self.caches
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // == Products ==
    pub fn product(&self, id: ProductId) -> Result<Product> {
        if let Some(product) = self.caches.products.get_by_id(id) {
            return Ok(product);
        }
        debug!(product_id = id, "product cache miss, fetching from store");
        let product = self.source.fetch_product(id)?;
        self.caches.products.put(product.clone());
        Ok(product)
    }

    pub fn products(&self) -> Result<Vec<Product>> {
        if let Some(products) = self.caches.products.get_all() {
            return Ok(products);
        }
        debug!("product list cache miss, fetching from store");
        let products = self.source.fetch_products()?;
        self.caches.products.put_all(products.clone());
        Ok(products)
    }

    /// Products in one category, served from the category index when the
    /// full product list is cached.
    pub fn products_in_category(&self, category_id: CategoryId) -> Result<Vec<Product>> {
        if let Some(products) = self.caches.products.get_by_category(category_id) {
            return Ok(products);
        }
        let mut products: Vec<Product> = self
            .products()?
            .into_iter()
            .filter(|product| product.category_id() == Some(category_id))
            .collect();
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    pub fn search_products(&self, query: &SearchQuery) -> Result<Page<Product>> {
        if let Some(page) = self.caches.products.get_search_results(query) {
            return Ok(page);
        }
        debug!(query = query.query(), "product search cache miss");
        let page = self.source.search_products(query)?;
        self.caches.products.put_search_results(query, page.clone());
        Ok(page)
    }

    // == Categories ==
    pub fn category(&self, id: CategoryId) -> Result<Category> {
        if let Some(category) = self.caches.categories.get_by_id(id) {
            return Ok(category);
        }
        debug!(category_id = id, "category cache miss, fetching from store");
        let category = self.source.fetch_category(id)?;
        self.caches.categories.put(category.clone());
        Ok(category)
    }

    pub fn category_by_name(&self, name: &str) -> Result<Category> {
        if let Some(category) = self.caches.categories.get_by_name(name) {
            return Ok(category);
        }
        let category = self.source.fetch_category_by_name(name)?;
        self.caches.categories.put(category.clone());
        Ok(category)
    }

    pub fn categories(&self) -> Result<Vec<Category>> {
        if let Some(categories) = self.caches.categories.get_all() {
            return Ok(categories);
        }
        let categories = self.source.fetch_categories()?;
        self.caches.categories.put_all(categories.clone());
        Ok(categories)
    }

    pub fn search_categories(&self, query: &SearchQuery) -> Result<Page<Category>> {
        if let Some(page) = self.caches.categories.get_search_results(query) {
            return Ok(page);
        }
        let page = self.source.search_categories(query)?;
        self.caches.categories.put_search_results(query, page.clone());
        Ok(page)
    }

    // == Inventory ==
    pub fn inventory(&self, id: InventoryId) -> Result<Inventory> {
        if let Some(inventory) = self.caches.inventory.get_by_id(id) {
            return Ok(inventory);
        }
        let inventory = self.source.fetch_inventory(id)?;
        self.caches.inventory.put(inventory.clone());
        Ok(inventory)
    }

    pub fn search_inventory(&self, query: &SearchQuery) -> Result<Page<Inventory>> {
        if let Some(page) = self.caches.inventory.get_search_results(query) {
            return Ok(page);
        }
        let page = self.source.search_inventory(query)?;
        self.caches.inventory.put_search_results(query, page.clone());
        Ok(page)
    }

    // == Write Notifications ==
    /// A product was created or updated in the store.
    ///
    /// Inventory pages embed products, so they are dropped too.
    pub fn product_saved(&self, product: Product) {
        self.caches.products.invalidate_by_id(product.id);
        self.caches.products.put(product);
        self.caches.inventory.invalidate_all_list();
    }

    pub fn product_deleted(&self, id: ProductId) {
        self.caches.products.invalidate_by_id(id);
        self.caches.inventory.invalidate_all_list();
    }

    /// A category was created or updated in the store.
    ///
    /// Cached products embed their category, so every member of the
    /// category group is dropped along with the product and inventory list
    /// views.
    pub fn category_saved(&self, category: Category) {
        let id = category.id;
        self.caches.categories.invalidate_by_id(id);
        self.caches.categories.put(category);
        self.drop_category_members(id);
    }

    pub fn category_deleted(&self, id: CategoryId) {
        self.caches.categories.invalidate_by_id(id);
        self.drop_category_members(id);
    }

    pub fn inventory_saved(&self, inventory: Inventory) {
        self.caches.inventory.invalidate_by_id(inventory.id);
        self.caches.inventory.put(inventory);
    }

    pub fn inventory_deleted(&self, id: InventoryId) {
        self.caches.inventory.invalidate_by_id(id);
    }

    fn drop_category_members(&self, category_id: CategoryId) {
        let members = self.caches.products.category_members(category_id);
        for product_id in &members {
            self.caches.products.invalidate_by_id(*product_id);
        }
        self.caches.products.invalidate_all_list();
        self.caches.inventory.invalidate_all_list();
        debug!(
            category_id,
            dropped = members.len(),
            "category change dropped cached products"
        );
    }
}
