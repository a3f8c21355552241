//! Shop Cache - in-process read caches for an e-commerce catalog
//!
//! Per-entity façades (products, categories, inventory) built from TTL
//! keyed stores, secondary indices, list snapshots and bounded search
//! caches, plus a cache-aside read path and an operational HTTP API.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod facade;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use catalog::{CachedCatalog, CatalogSource, MemoryCatalog};
pub use config::Config;
pub use error::{CacheError, Result};
pub use facade::{CacheAdmin, CacheRegistry, CacheService, SearchCacheService};
pub use tasks::spawn_cleanup_task;
