//! API Module
//!
//! Operational HTTP surface of the catalog cache.
//!
//! # Endpoints
//! - `GET /health` - Health check
//! - `GET /stats` - Statistics for every cache
//! - `GET /stats/:cache` - Statistics for one cache
//! - `POST /stats/reset` - Reset every cache's counters
//! - `POST /stats/:cache/reset` - Reset one cache's counters
//! - `DELETE /cache/:cache` - Clear one cache
//! - `DELETE /cache/:cache/:id` - Invalidate one entity
//! - `POST /cache/:cache/invalidate` - Invalidate a batch of entities

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
