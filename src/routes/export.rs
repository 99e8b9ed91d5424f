//! CSV download endpoints for the currently filtered result sets.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::cache::{cache_key, cached};
use crate::errors::AppError;
use crate::models::params::{DateRangeQuery, InventoryQuery, TopQuery};
use crate::services::export::{export_filename, to_csv};
use crate::services::metrics;
use crate::services::selection::{filter_date_range, filter_inventory};
use crate::services::shaping::with_moving_average;
use crate::AppState;

/// Wrap CSV text as a file download response.
fn csv_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// GET /api/v1/export/customers.csv?limit — top customers as CSV.
pub async fn customers_csv(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Result<Response, AppError> {
    let limit = query.limit();
    let key = cache_key("top_customers", &[("limit", limit.to_string())]);
    let rows = cached(&state.cache, &key, || {
        metrics::top_customers(&state.db, limit)
    })
    .await?;
    let body = to_csv(&rows)?;
    let filename = export_filename("top_customers", Utc::now().date_naive());
    Ok(csv_response(&filename, body))
}

/// GET /api/v1/export/inventory.csv?store&status — filtered inventory rows,
/// derived status column included.
pub async fn inventory_csv(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<Response, AppError> {
    let items = cached(&state.cache, "inventory_status", || {
        metrics::inventory_status(&state.db)
    })
    .await?;
    let items = filter_inventory(items, query.store.as_deref(), query.status);
    let body = to_csv(&items)?;
    let filename = export_filename("inventory", Utc::now().date_naive());
    Ok(csv_response(&filename, body))
}

/// GET /api/v1/export/trend.csv?start_date&end_date — filtered daily series
/// with its moving-average column.
pub async fn trend_csv(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Response, AppError> {
    range.validate()?;
    let points = cached(&state.cache, "sales_trend", || {
        metrics::sales_trend(&state.db)
    })
    .await?;
    let points = filter_date_range(points, range.start_date, range.end_date);
    let body = to_csv(&with_moving_average(&points))?;
    let filename = export_filename("sales_trend", Utc::now().date_naive());
    Ok(csv_response(&filename, body))
}
