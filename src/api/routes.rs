//! API Routes

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, health_handler, invalidate_all_handler, invalidate_id_handler,
    invalidate_ids_handler, reset_cache_stats_handler, reset_stats_handler, stats_handler,
    AppState,
};

/// Creates the ops router with CORS and request tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/stats/reset", post(reset_stats_handler))
        .route("/stats/:cache", get(cache_stats_handler))
        .route("/stats/:cache/reset", post(reset_cache_stats_handler))
        .route("/cache/:cache", delete(invalidate_all_handler))
        .route("/cache/:cache/invalidate", post(invalidate_ids_handler))
        .route("/cache/:cache/:id", delete(invalidate_id_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
