//! Product routes: top sellers, brand performance, and inventory.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::cache::{cache_key, cached};
use crate::errors::{ApiResponse, AppError};
use crate::models::params::{InventoryQuery, TopQuery};
use crate::services::metrics::{self, BrandPerformance, InventoryItem, ProductSales};
use crate::services::selection::{
    self, filter_inventory, inventory_summary, InventorySummary,
};
use crate::AppState;

/// Inventory rows plus their per-status counts.
#[derive(Debug, Serialize)]
pub struct InventoryReport {
    pub summary: InventorySummary,
    pub items: Vec<InventoryItem>,
}

/// Optional client-side truncation for the brand listing.
#[derive(Debug, Default, Deserialize)]
pub struct BrandQuery {
    pub top: Option<usize>,
}

/// GET /api/v1/products/top?limit — best-selling products by revenue.
pub async fn top(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Result<Json<ApiResponse<Vec<ProductSales>>>, AppError> {
    let limit = query.limit();
    let key = cache_key("top_products", &[("limit", limit.to_string())]);
    let rows = cached(&state.cache, &key, || {
        metrics::top_products(&state.db, limit)
    })
    .await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/v1/products/brands?top — per-brand performance, optionally
/// truncated to the top N by revenue (unsold brands sink to the bottom).
pub async fn brands(
    State(state): State<AppState>,
    Query(query): Query<BrandQuery>,
) -> Result<Json<ApiResponse<Vec<BrandPerformance>>>, AppError> {
    let rows = cached(&state.cache, "brand_performance", || {
        metrics::brand_performance(&state.db)
    })
    .await?;
    let rows = match query.top {
        Some(n) => selection::top_n_by(
            rows,
            n,
            |b| b.revenue.unwrap_or(f64::NEG_INFINITY),
            |b| b.brand_name.clone(),
        ),
        None => rows,
    };
    Ok(ApiResponse::success(rows))
}

/// GET /api/v1/products/inventory?store&status — stock levels filtered by
/// store and/or derived status, with per-status counts.
pub async fn inventory(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<ApiResponse<InventoryReport>>, AppError> {
    let items = cached(&state.cache, "inventory_status", || {
        metrics::inventory_status(&state.db)
    })
    .await?;
    let items = filter_inventory(items, query.store.as_deref(), query.status);
    Ok(ApiResponse::success(InventoryReport {
        summary: inventory_summary(&items),
        items,
    }))
}
