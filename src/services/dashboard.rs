//! Aggregated overview statistics for the dashboard landing page.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::services::metrics::{
    self, CategorySales, KeyMetrics, OrderStatusCount, ProductSales,
};
use crate::services::shaping::{self, StorePerformance};

/// Products shown on the overview page.
const OVERVIEW_TOP_PRODUCTS: i64 = 5;

/// Everything the overview page renders in one payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub key_metrics: KeyMetrics,
    pub sales_by_category: Vec<CategorySales>,
    pub top_products: Vec<ProductSales>,
    pub order_status: Vec<OrderStatusCount>,
    pub store_performance: Vec<StorePerformance>,
}

/// Fetch all overview statistics in parallel queries.
pub async fn get_stats(pool: &PgPool) -> Result<DashboardStats, AppError> {
    let (key_metrics, sales_by_category, top_products, order_status, stores) = tokio::try_join!(
        metrics::key_metrics(pool),
        metrics::sales_by_category(pool),
        metrics::top_products(pool, OVERVIEW_TOP_PRODUCTS),
        metrics::order_status_distribution(pool),
        metrics::sales_by_store(pool),
    )?;

    Ok(DashboardStats {
        key_metrics,
        sales_by_category,
        top_products,
        order_status,
        store_performance: shaping::store_performance(stores),
    })
}
