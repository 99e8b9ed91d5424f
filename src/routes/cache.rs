//! Cache administration: on-demand clear-all.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// How many entries a clear removed.
#[derive(Debug, Serialize)]
pub struct CacheCleared {
    pub cleared: usize,
}

/// POST /api/v1/cache/clear — drop every cached query result.
pub async fn clear(State(state): State<AppState>) -> Json<ApiResponse<CacheCleared>> {
    let cleared = state.cache.clear().await;
    tracing::info!(cleared, "Query cache cleared");
    ApiResponse::success(CacheCleared { cleared })
}
