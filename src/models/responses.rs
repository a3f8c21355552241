//! Response DTOs for the ops API

use serde::Serialize;

use crate::cache::CacheStatsReport;

/// Response body for `GET /stats` and `GET /stats/:cache`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub caches: Vec<CacheStatsReport>,
}

impl StatsResponse {
    pub fn new(caches: Vec<CacheStatsReport>) -> Self {
        Self { caches }
    }
}

/// Response body for invalidation endpoints
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub cache: String,
    /// Ids dropped, empty when the whole cache was cleared
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u64>,
}

impl InvalidateResponse {
    pub fn all(cache: impl Into<String>) -> Self {
        let cache = cache.into();
        Self {
            message: format!("Cache '{}' cleared", cache),
            cache,
            ids: Vec::new(),
        }
    }

    pub fn ids(cache: impl Into<String>, ids: Vec<u64>) -> Self {
        let cache = cache.into();
        Self {
            message: format!("{} entries invalidated in '{}'", ids.len(), cache),
            cache,
            ids,
        }
    }
}

/// Response body for the stats reset endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub message: String,
    pub caches: Vec<String>,
}

impl ResetResponse {
    pub fn new(caches: Vec<String>) -> Self {
        Self {
            message: format!("Statistics reset for {} cache(s)", caches.len()),
            caches,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
