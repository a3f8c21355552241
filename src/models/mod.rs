//! Catalog models and the DTOs of the ops API
//!
//! `catalog` and `page` hold the values the caches store. `requests` and
//! `responses` describe HTTP bodies.

pub mod catalog;
pub mod page;
pub mod requests;
pub mod responses;

pub use catalog::{Category, CategoryId, Inventory, InventoryId, Product, ProductId};
pub use page::Page;
pub use requests::InvalidateRequest;
pub use responses::{
    ErrorResponse, HealthResponse, InvalidateResponse, ResetResponse, StatsResponse,
};
