//! In-memory catalog store.
//!
//! Plays the role of the relational store in tests and local runs. Counts
//! every read so callers can see which requests reached the store.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::cache::SearchQuery;
use crate::catalog::CatalogSource;
use crate::error::{CacheError, Result};
use crate::models::{Category, CategoryId, Inventory, InventoryId, Page, Product, ProductId};

// == Memory Catalog ==
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<Vec<Product>>,
    categories: RwLock<Vec<Category>>,
    inventory: RwLock<Vec<Inventory>>,
    reads: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store reads served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    // == Writes ==
    /// Inserts or replaces a product by id.
    pub fn upsert_product(&self, product: Product) {
        upsert(&self.products, product, |p| p.id);
    }

    pub fn remove_product(&self, id: ProductId) {
        self.products.write().retain(|p| p.id != id);
    }

    pub fn upsert_category(&self, category: Category) {
        upsert(&self.categories, category, |c| c.id);
    }

    pub fn remove_category(&self, id: CategoryId) {
        self.categories.write().retain(|c| c.id != id);
    }

    pub fn upsert_inventory(&self, inventory: Inventory) {
        upsert(&self.inventory, inventory, |i| i.id);
    }

    pub fn remove_inventory(&self, id: InventoryId) {
        self.inventory.write().retain(|i| i.id != id);
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

fn upsert<T>(rows: &RwLock<Vec<T>>, row: T, id_of: impl Fn(&T) -> u64) {
    let mut rows = rows.write();
    let id = id_of(&row);
    match rows.iter_mut().find(|existing| id_of(existing) == id) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }
}

fn find<T: Clone>(
    rows: &RwLock<Vec<T>>,
    entity: &'static str,
    id: u64,
    id_of: impl Fn(&T) -> u64,
) -> Result<T> {
    rows.read()
        .iter()
        .find(|row| id_of(row) == id)
        .cloned()
        .ok_or(CacheError::NotFound { entity, id })
}

// == Query Helpers ==
/// Splits a `field,direction` sort spec. Direction defaults to ascending.
fn parse_sort(sort: &str) -> (String, bool) {
    let mut parts = sort.split(',').map(|part| part.trim().to_lowercase());
    let field = parts.next().unwrap_or_default();
    let descending = parts.next().is_some_and(|dir| dir == "desc");
    (field, descending)
}

fn contains_ignore_case(text: &str, needle: &str) -> bool {
    needle.is_empty() || text.to_lowercase().contains(needle)
}

/// Sorts, then cuts out the requested 1-based page (page 0 reads as 1).
fn paginate<T>(
    mut items: Vec<T>,
    query: &SearchQuery,
    compare: impl Fn(&T, &T, &str) -> CmpOrdering,
) -> Page<T> {
    let (field, descending) = parse_sort(query.sort());
    if !field.is_empty() {
        items.sort_by(|a, b| {
            let ordering = compare(a, b, &field);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    let total = items.len() as u64;
    let size = query.size() as usize;
    let skip = (query.page().max(1) as usize - 1).saturating_mul(size);
    let content = items.into_iter().skip(skip).take(size).collect();
    Page::new(content, query.page(), query.size(), total)
}

impl CatalogSource for MemoryCatalog {
    fn fetch_product(&self, id: ProductId) -> Result<Product> {
        self.record_read();
        find(&self.products, "product", id, |p| p.id)
    }

    fn fetch_products(&self) -> Result<Vec<Product>> {
        self.record_read();
        Ok(self.products.read().clone())
    }

    fn search_products(&self, query: &SearchQuery) -> Result<Page<Product>> {
        self.record_read();
        let needle = query.query().trim().to_lowercase();
        let found: Vec<Product> = self
            .products
            .read()
            .iter()
            .filter(|p| {
                contains_ignore_case(&p.name, &needle)
                    || p.description.as_deref().is_some_and(|d| contains_ignore_case(d, &needle))
            })
            .cloned()
            .collect();
        Ok(paginate(found, query, |a, b, field| match field {
            "name" => a.name.cmp(&b.name),
            "price" => a.price.total_cmp(&b.price),
            _ => a.id.cmp(&b.id),
        }))
    }

    fn fetch_category(&self, id: CategoryId) -> Result<Category> {
        self.record_read();
        find(&self.categories, "category", id, |c| c.id)
    }

    fn fetch_category_by_name(&self, name: &str) -> Result<Category> {
        self.record_read();
        let key = Category::name_key(name);
        self.categories
            .read()
            .iter()
            .find(|c| Category::name_key(&c.name) == key)
            .cloned()
            .ok_or_else(|| CacheError::NameNotFound {
                entity: "category",
                name: name.trim().to_string(),
            })
    }

    fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.record_read();
        Ok(self.categories.read().clone())
    }

    fn search_categories(&self, query: &SearchQuery) -> Result<Page<Category>> {
        self.record_read();
        let needle = query.query().trim().to_lowercase();
        let found: Vec<Category> = self
            .categories
            .read()
            .iter()
            .filter(|c| contains_ignore_case(&c.name, &needle))
            .cloned()
            .collect();
        Ok(paginate(found, query, |a, b, field| match field {
            "name" => a.name.cmp(&b.name),
            _ => a.id.cmp(&b.id),
        }))
    }

    fn fetch_inventory(&self, id: InventoryId) -> Result<Inventory> {
        self.record_read();
        find(&self.inventory, "inventory", id, |i| i.id)
    }

    fn search_inventory(&self, query: &SearchQuery) -> Result<Page<Inventory>> {
        self.record_read();
        let needle = query.query().trim().to_lowercase();
        let found: Vec<Inventory> = self
            .inventory
            .read()
            .iter()
            .filter(|i| {
                needle.is_empty()
                    || i.product.as_ref().is_some_and(|p| contains_ignore_case(&p.name, &needle))
            })
            .cloned()
            .collect();
        Ok(paginate(found, query, |a, b, field| match field {
            "quantity" => a.quantity.cmp(&b.quantity),
            _ => a.id.cmp(&b.id),
        }))
    }
}
