//! API Handlers
//!
//! Operational endpoints over the cache façades: health, statistics and
//! manual invalidation.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::facade::{CacheAdmin, CacheRegistry};
use crate::models::{
    HealthResponse, InvalidateRequest, InvalidateResponse, ResetResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub caches: CacheRegistry,
}

impl AppState {
    pub fn new(caches: CacheRegistry) -> Self {
        Self { caches }
    }

    /// Builds the façades from configuration on the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheRegistry::from_config(config))
    }

    fn cache(&self, name: &str) -> Result<&dyn CacheAdmin> {
        self.caches
            .get(name)
            .ok_or_else(|| CacheError::UnknownCache(name.to_string()))
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let reports = state.caches.all().iter().map(|cache| cache.stats()).collect();
    Json(StatsResponse::new(reports))
}

/// Handler for GET /stats/:cache
pub async fn cache_stats_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StatsResponse>> {
    let cache = state.cache(&name)?;
    Ok(Json(StatsResponse::new(vec![cache.stats()])))
}

/// Handler for POST /stats/reset
pub async fn reset_stats_handler(State(state): State<AppState>) -> Json<ResetResponse> {
    let names = state
        .caches
        .all()
        .iter()
        .map(|cache| {
            cache.reset_stats();
            cache.name().to_string()
        })
        .collect();
    info!("statistics reset for all caches");
    Json(ResetResponse::new(names))
}

/// Handler for POST /stats/:cache/reset
pub async fn reset_cache_stats_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ResetResponse>> {
    let cache = state.cache(&name)?;
    cache.reset_stats();
    info!(cache = cache.name(), "statistics reset");
    Ok(Json(ResetResponse::new(vec![cache.name().to_string()])))
}

/// Handler for DELETE /cache/:cache
pub async fn invalidate_all_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let cache = state.cache(&name)?;
    cache.invalidate_all();
    Ok(Json(InvalidateResponse::all(cache.name())))
}

/// Handler for DELETE /cache/:cache/:id
///
/// Non-numeric ids are rejected by the path extractor with 400.
pub async fn invalidate_id_handler(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, u64)>,
) -> Result<Json<InvalidateResponse>> {
    let cache = state.cache(&name)?;
    cache.invalidate_by_id(id);
    info!(cache = cache.name(), id, "entry invalidated via API");
    Ok(Json(InvalidateResponse::ids(cache.name(), vec![id])))
}

/// Handler for POST /cache/:cache/invalidate
pub async fn invalidate_ids_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let cache = state.cache(&name)?;
    for id in &req.ids {
        cache.invalidate_by_id(*id);
    }
    info!(cache = cache.name(), count = req.ids.len(), "entries invalidated via API");
    Ok(Json(InvalidateResponse::ids(cache.name(), req.ids)))
}
