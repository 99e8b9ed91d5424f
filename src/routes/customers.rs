//! Customer routes: top spenders and geographic rollups.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::cache::{cache_key, cached};
use crate::errors::{ApiResponse, AppError};
use crate::models::params::TopQuery;
use crate::services::metrics::{self, CustomerSpend};
use crate::services::selection::{rollup_by_city, rollup_by_state, GeoBreakdown};
use crate::AppState;

/// State and city rollups over the current top-customer set.
#[derive(Debug, Serialize)]
pub struct CustomerGeography {
    pub by_state: Vec<GeoBreakdown>,
    pub by_city: Vec<GeoBreakdown>,
}

/// GET /api/v1/customers/top?limit — biggest spenders.
pub async fn top(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Result<Json<ApiResponse<Vec<CustomerSpend>>>, AppError> {
    let limit = query.limit();
    let key = cache_key("top_customers", &[("limit", limit.to_string())]);
    let rows = cached(&state.cache, &key, || {
        metrics::top_customers(&state.db, limit)
    })
    .await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/v1/customers/geography?limit — where the top spenders are.
pub async fn geography(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Result<Json<ApiResponse<CustomerGeography>>, AppError> {
    let limit = query.limit();
    let key = cache_key("top_customers", &[("limit", limit.to_string())]);
    let rows = cached(&state.cache, &key, || {
        metrics::top_customers(&state.db, limit)
    })
    .await?;
    Ok(ApiResponse::success(CustomerGeography {
        by_state: rollup_by_state(&rows),
        by_city: rollup_by_city(&rows),
    }))
}
