//! Route definitions for the analytics API.

pub mod cache;
pub mod customers;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod products;
pub mod sales;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Assemble the full application router.
pub fn api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/sales/categories", get(sales::categories))
        .route("/sales/stores", get(sales::stores))
        .route("/sales/trend", get(sales::trend))
        .route("/sales/status-distribution", get(sales::status_distribution))
        .route("/products/top", get(products::top))
        .route("/products/brands", get(products::brands))
        .route("/products/inventory", get(products::inventory))
        .route("/customers/top", get(customers::top))
        .route("/customers/geography", get(customers::geography))
        .route("/export/customers.csv", get(export::customers_csv))
        .route("/export/inventory.csv", get(export::inventory_csv))
        .route("/export/trend.csv", get(export::trend_csv))
        .route("/cache/clear", post(cache::clear));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
