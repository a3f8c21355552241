//! Configuration Module
//!
//! Loads cache TTLs, search capacity and server settings from environment
//! variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_SEARCH_CAPACITY;

// == Cache Policy ==
/// TTLs and search bound for one entity façade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Lifetime of per-id entries and of the "list all" snapshot
    pub ttl: Duration,
    /// Lifetime of cached search pages
    pub search_ttl: Duration,
    /// Maximum number of cached search pages
    pub search_capacity: usize,
}

impl CachePolicy {
    pub fn new(ttl_secs: u64, search_ttl_secs: u64, search_capacity: usize) -> Self {
        Self {
            ttl: Duration::from_secs(ttl_secs),
            search_ttl: Duration::from_secs(search_ttl_secs),
            search_capacity: search_capacity.max(1),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub product: CachePolicy,
    pub category: CachePolicy,
    pub inventory: CachePolicy,
    /// HTTP port of the ops API
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PRODUCT_TTL` / `PRODUCT_SEARCH_TTL` - seconds (default: 300 / 120)
    /// - `CATEGORY_TTL` / `CATEGORY_SEARCH_TTL` - seconds (default: 600 / 300)
    /// - `INVENTORY_TTL` / `INVENTORY_SEARCH_TTL` - seconds (default: 120 / 60)
    /// - `SEARCH_CACHE_CAPACITY` - search pages per façade (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - sweep frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let capacity = env_or("SEARCH_CACHE_CAPACITY", DEFAULT_SEARCH_CAPACITY);

        Self {
            product: CachePolicy::new(
                env_or("PRODUCT_TTL", defaults.product.ttl.as_secs()),
                env_or("PRODUCT_SEARCH_TTL", defaults.product.search_ttl.as_secs()),
                capacity,
            ),
            category: CachePolicy::new(
                env_or("CATEGORY_TTL", defaults.category.ttl.as_secs()),
                env_or("CATEGORY_SEARCH_TTL", defaults.category.search_ttl.as_secs()),
                capacity,
            ),
            inventory: CachePolicy::new(
                env_or("INVENTORY_TTL", defaults.inventory.ttl.as_secs()),
                env_or("INVENTORY_SEARCH_TTL", defaults.inventory.search_ttl.as_secs()),
                capacity,
            ),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }
}

/// Reads and parses `name`, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            product: CachePolicy::new(300, 120, DEFAULT_SEARCH_CAPACITY),
            category: CachePolicy::new(600, 300, DEFAULT_SEARCH_CAPACITY),
            inventory: CachePolicy::new(120, 60, DEFAULT_SEARCH_CAPACITY),
            server_port: 3000,
            cleanup_interval: 30,
        }
    }
}
