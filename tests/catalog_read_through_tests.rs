//! Read-through behaviour of the cached catalog against the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use shop_cache::{
    cache::{ManualClock, SearchQuery},
    models::{Category, Inventory, Product},
    CacheAdmin, CacheError, CacheRegistry, CachedCatalog, Config, MemoryCatalog,
};

fn office() -> Category {
    Category::new(10, "Office")
}

fn catalog() -> (CachedCatalog<MemoryCatalog>, Arc<ManualClock>) {
    let store = MemoryCatalog::new();
    store.upsert_category(office());
    store.upsert_category(Category::new(20, "Garden"));
    store.upsert_product(Product::new(1, "Desk", 250.0).with_category(office()));
    store.upsert_product(Product::new(2, "Chair", 90.0).with_category(office()));
    store.upsert_product(Product::new(3, "Hose", 20.0).with_category(Category::new(20, "Garden")));
    store.upsert_inventory(Inventory::new(100, 5).with_product(Product::new(1, "Desk", 250.0)));

    let clock = ManualClock::shared();
    let caches = CacheRegistry::new(&Config::default(), clock.clone());
    (CachedCatalog::new(store, caches), clock)
}

#[test]
fn test_second_read_is_served_from_cache() {
    let (catalog, _) = catalog();

    assert_eq!(catalog.product(1).unwrap().name, "Desk");
    assert_eq!(catalog.product(1).unwrap().name, "Desk");

    assert_eq!(catalog.source().reads(), 1);
    let report = catalog.caches().products.stats();
    assert_eq!((report.hits, report.misses), (1, 1));
}

#[test]
fn test_missing_entity_is_not_cached() {
    let (catalog, _) = catalog();

    assert!(matches!(catalog.product(42), Err(CacheError::NotFound { id: 42, .. })));
    assert!(catalog.product(42).is_err());

    assert_eq!(catalog.source().reads(), 2);
}

#[test]
fn test_expired_entry_is_refetched() {
    let (catalog, clock) = catalog();

    catalog.product(1).unwrap();
    clock.advance(Duration::from_secs(301));
    catalog.product(1).unwrap();

    assert_eq!(catalog.source().reads(), 2);
}

#[test]
fn test_products_in_category_uses_index_after_full_list() {
    let (catalog, _) = catalog();

    catalog.products().unwrap();
    let office_ids: Vec<u64> = catalog
        .products_in_category(10)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(office_ids, vec![1, 2]);
    assert_eq!(catalog.source().reads(), 1);
}

#[test]
fn test_search_is_cached_by_normalized_signature() {
    let (catalog, _) = catalog();

    let first = catalog
        .search_products(&SearchQuery::new("  DESK ", 1, 10, "price,asc"))
        .unwrap();
    let second = catalog
        .search_products(&SearchQuery::new("desk", 1, 10, "price,asc"))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(catalog.source().reads(), 1);
    // Items of a cached page are warmed into the per-id store
    catalog.product(1).unwrap();
    assert_eq!(catalog.source().reads(), 1);
}

#[test]
fn test_product_saved_refreshes_entry_and_inventory_pages() {
    let (catalog, _) = catalog();
    let query = SearchQuery::new("desk", 1, 10, "id");
    catalog.search_inventory(&query).unwrap();

    let renamed = Product::new(1, "Standing Desk", 400.0).with_category(office());
    catalog.source().upsert_product(renamed.clone());
    catalog.product_saved(renamed);

    assert_eq!(catalog.product(1).unwrap().name, "Standing Desk");
    let reads = catalog.source().reads();
    catalog.search_inventory(&query).unwrap();
    assert_eq!(catalog.source().reads(), reads + 1);
}

#[test]
fn test_category_saved_drops_member_products() {
    let (catalog, _) = catalog();
    catalog.products().unwrap();

    catalog.category_saved(Category::new(10, "Workspace"));

    let report = catalog.caches().products.stats();
    assert_eq!(report.entries, 1);
    assert!(!report.snapshot_cached);
    assert_eq!(catalog.category(10).unwrap().name, "Workspace");
}

#[test]
fn test_category_change_drops_inventory_pages() {
    let (catalog, _) = catalog();
    let query = SearchQuery::new("desk", 1, 10, "id");
    catalog.search_inventory(&query).unwrap();

    catalog.category_saved(Category::new(10, "Workspace"));
    let reads = catalog.source().reads();
    catalog.search_inventory(&query).unwrap();
    assert_eq!(catalog.source().reads(), reads + 1);

    catalog.category_deleted(10);
    let reads = catalog.source().reads();
    catalog.search_inventory(&query).unwrap();
    assert_eq!(catalog.source().reads(), reads + 1);
}

#[test]
fn test_category_by_name_fetches_once() {
    let (catalog, _) = catalog();

    assert_eq!(catalog.category_by_name("GARDEN").unwrap().id, 20);
    assert_eq!(catalog.category_by_name("garden").unwrap().id, 20);
    assert_eq!(catalog.category(20).unwrap().id, 20);

    assert_eq!(catalog.source().reads(), 1);
    assert!(matches!(
        catalog.category_by_name("kitchen"),
        Err(CacheError::NameNotFound { .. })
    ));
}

#[test]
fn test_deleted_inventory_is_refetched() {
    let (catalog, _) = catalog();
    catalog.inventory(100).unwrap();

    catalog.source().remove_inventory(100);
    catalog.inventory_deleted(100);

    assert!(catalog.inventory(100).is_err());
}
