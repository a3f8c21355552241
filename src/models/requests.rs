//! Request DTOs for the ops API

use serde::Deserialize;

/// Most ids accepted by one bulk invalidation call
pub const MAX_INVALIDATE_IDS: usize = 1000;

/// Request body for `POST /cache/:cache/invalidate`
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    pub ids: Vec<u64>,
}

impl InvalidateRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.ids.is_empty() {
            return Some("ids cannot be empty".to_string());
        }
        if self.ids.len() > MAX_INVALIDATE_IDS {
            return Some(format!(
                "at most {} ids can be invalidated per request",
                MAX_INVALIDATE_IDS
            ));
        }
        None
    }
}
