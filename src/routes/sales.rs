//! Sales routes: category, store, trend, and order-status breakdowns.

use axum::extract::{Query, State};
use axum::Json;

use crate::cache::cached;
use crate::errors::{ApiResponse, AppError};
use crate::models::params::DateRangeQuery;
use crate::services::metrics::{self, CategorySales, OrderStatusCount};
use crate::services::selection::filter_date_range;
use crate::services::shaping::{self, StorePerformance, TrendReport};
use crate::AppState;

/// GET /api/v1/sales/categories — units and revenue per category.
pub async fn categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategorySales>>>, AppError> {
    let rows = cached(&state.cache, "sales_by_category", || {
        metrics::sales_by_category(&state.db)
    })
    .await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/v1/sales/stores — per-store sales with derived per-order ratios.
pub async fn stores(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StorePerformance>>>, AppError> {
    let rows = cached(&state.cache, "sales_by_store", || {
        metrics::sales_by_store(&state.db)
    })
    .await?;
    Ok(ApiResponse::success(shaping::store_performance(rows)))
}

/// GET /api/v1/sales/trend?start_date&end_date — date-filtered daily series
/// with moving average, range statistics, and growth when defined.
pub async fn trend(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<TrendReport>>, AppError> {
    range.validate()?;
    let points = cached(&state.cache, "sales_trend", || {
        metrics::sales_trend(&state.db)
    })
    .await?;
    let points = filter_date_range(points, range.start_date, range.end_date);
    Ok(ApiResponse::success(shaping::trend_report(&points)))
}

/// GET /api/v1/sales/status-distribution — order counts per status label.
pub async fn status_distribution(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderStatusCount>>>, AppError> {
    let rows = cached(&state.cache, "order_status_distribution", || {
        metrics::order_status_distribution(&state.db)
    })
    .await?;
    Ok(ApiResponse::success(rows))
}
