//! Error types for the catalog cache
//!
//! Cache lookups never fail (absence is a miss). Errors come from the
//! backing store on the read-through path and from the ops API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
#[derive(Error, Debug)]
pub enum CacheError {
    /// Entity not found in the backing store
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("{entity} '{name}' not found")]
    NameNotFound { entity: &'static str, name: String },

    /// No façade is registered under the requested name
    #[error("Unknown cache: {0}")]
    UnknownCache(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Backing store failed while serving a miss
    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound { .. }
            | CacheError::NameNotFound { .. }
            | CacheError::UnknownCache(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Store(_) => StatusCode::BAD_GATEWAY,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CacheError::NotFound {
            entity: "product",
            id: 7,
        };
        assert_eq!(err.to_string(), "product 7 not found");
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = CacheError::UnknownCache("reviews".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Unknown cache: reviews" }));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CacheError::UnknownCache("x".into()), StatusCode::NOT_FOUND),
            (CacheError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (CacheError::Store("x".into()), StatusCode::BAD_GATEWAY),
            (CacheError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
