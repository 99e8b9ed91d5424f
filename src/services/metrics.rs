//! The metric query set: fixed aggregation queries over the bike store schema.
//!
//! Every revenue metric counts completed orders only (`order_status = 4`) and
//! prices a line as `quantity * list_price * (1 - discount)`. Currency is
//! rounded to 2 decimal places at the query boundary; limits and dates are
//! bound parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::order::OrderStatus;
use crate::models::stock::StockStatus;

/// Headline scalars for the overview metric cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct KeyMetrics {
    pub total_orders: i64,
    pub total_customers: i64,
    pub total_products: i64,
    pub total_revenue: f64,
}

/// Units and revenue for one product category.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategorySales {
    pub category_name: String,
    pub total_quantity: i64,
    pub total_sales: f64,
}

/// Sales aggregate for one product.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductSales {
    pub product_name: String,
    pub brand_name: String,
    pub category_name: String,
    pub units_sold: i64,
    pub revenue: f64,
}

/// Spend aggregate for one customer.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomerSpend {
    pub customer_id: i32,
    pub customer_name: String,
    pub email: String,
    pub city: String,
    pub state: String,
    pub total_orders: i64,
    pub total_spent: f64,
}

/// Sales aggregate for one store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoreSales {
    pub store_name: String,
    pub city: String,
    pub state: String,
    pub total_orders: i64,
    pub units_sold: i64,
    pub revenue: f64,
}

/// One calendar day of the sales trend, ordered ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrendPoint {
    pub order_date: NaiveDate,
    pub num_orders: i64,
    pub units_sold: i64,
    pub daily_revenue: f64,
}

/// Stock level for one (store, product) pair with its derived status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub store_name: String,
    pub product_name: String,
    pub category_name: String,
    pub quantity: i32,
    pub status: StockStatus,
}

/// Intermediate row before status classification.
#[derive(Debug, sqlx::FromRow)]
struct InventoryRow {
    store_name: String,
    product_name: String,
    category_name: String,
    quantity: i32,
}

/// Order count for one raw status code, with its display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusCount {
    pub status_code: i16,
    pub status_name: String,
    pub count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct StatusRow {
    order_status: i16,
    count: i64,
}

/// Performance aggregate for one brand. `units_sold` and `revenue` are null
/// for brands whose products have no completed sales.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BrandPerformance {
    pub brand_name: String,
    pub num_products: i64,
    pub units_sold: Option<i64>,
    pub avg_price: f64,
    pub revenue: Option<f64>,
}

/// Headline business metrics over completed orders. A database with no
/// completed orders yields all-zero scalars, not an error.
pub async fn key_metrics(pool: &PgPool) -> Result<KeyMetrics, AppError> {
    let row = sqlx::query_as::<_, KeyMetrics>(
        r#"
        SELECT
            COUNT(DISTINCT o.order_id) AS total_orders,
            COUNT(DISTINCT o.customer_id) AS total_customers,
            COUNT(DISTINCT ot.product_id) AS total_products,
            ROUND(COALESCE(SUM(ot.quantity * ot.list_price * (1 - ot.discount)), 0)::numeric, 2)::float8
                AS total_revenue
        FROM orders o
        LEFT JOIN order_items ot ON o.order_id = ot.order_id
        WHERE o.order_status = 4
        "#,
    )
    .fetch_optional(pool)
    .await?;
    Ok(row.unwrap_or_default())
}

/// Units and revenue per category, highest revenue first.
pub async fn sales_by_category(pool: &PgPool) -> Result<Vec<CategorySales>, AppError> {
    let rows = sqlx::query_as::<_, CategorySales>(
        r#"
        SELECT
            c.category_name,
            SUM(ot.quantity) AS total_quantity,
            ROUND(SUM(ot.quantity * ot.list_price * (1 - ot.discount))::numeric, 2)::float8
                AS total_sales
        FROM order_items ot
        JOIN products p ON ot.product_id = p.product_id
        JOIN categories c ON p.category_id = c.category_id
        JOIN orders o ON ot.order_id = o.order_id
        WHERE o.order_status = 4
        GROUP BY c.category_name
        ORDER BY total_sales DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Top `limit` products by revenue.
pub async fn top_products(pool: &PgPool, limit: i64) -> Result<Vec<ProductSales>, AppError> {
    let rows = sqlx::query_as::<_, ProductSales>(
        r#"
        SELECT
            p.product_name,
            b.brand_name,
            c.category_name,
            SUM(ot.quantity) AS units_sold,
            ROUND(SUM(ot.quantity * ot.list_price * (1 - ot.discount))::numeric, 2)::float8
                AS revenue
        FROM order_items ot
        JOIN products p ON ot.product_id = p.product_id
        JOIN brands b ON p.brand_id = b.brand_id
        JOIN categories c ON p.category_id = c.category_id
        JOIN orders o ON ot.order_id = o.order_id
        WHERE o.order_status = 4
        GROUP BY p.product_name, b.brand_name, c.category_name
        ORDER BY revenue DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Top `limit` customers by total spend.
pub async fn top_customers(pool: &PgPool, limit: i64) -> Result<Vec<CustomerSpend>, AppError> {
    let rows = sqlx::query_as::<_, CustomerSpend>(
        r#"
        SELECT
            c.customer_id,
            c.first_name || ' ' || c.last_name AS customer_name,
            c.email,
            c.city,
            c.state,
            COUNT(DISTINCT o.order_id) AS total_orders,
            ROUND(SUM(ot.quantity * ot.list_price * (1 - ot.discount))::numeric, 2)::float8
                AS total_spent
        FROM customers c
        JOIN orders o ON c.customer_id = o.customer_id
        JOIN order_items ot ON o.order_id = ot.order_id
        WHERE o.order_status = 4
        GROUP BY c.customer_id, c.first_name, c.last_name, c.email, c.city, c.state
        ORDER BY total_spent DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Order count, units, and revenue per store, highest revenue first.
pub async fn sales_by_store(pool: &PgPool) -> Result<Vec<StoreSales>, AppError> {
    let rows = sqlx::query_as::<_, StoreSales>(
        r#"
        SELECT
            s.store_name,
            s.city,
            s.state,
            COUNT(DISTINCT o.order_id) AS total_orders,
            SUM(ot.quantity) AS units_sold,
            ROUND(SUM(ot.quantity * ot.list_price * (1 - ot.discount))::numeric, 2)::float8
                AS revenue
        FROM stores s
        JOIN orders o ON s.store_id = o.store_id
        JOIN order_items ot ON o.order_id = ot.order_id
        WHERE o.order_status = 4
        GROUP BY s.store_name, s.city, s.state
        ORDER BY revenue DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Daily sales series, ascending by date. The ordering is load-bearing for
/// the moving-average and range-filter steps downstream.
pub async fn sales_trend(pool: &PgPool) -> Result<Vec<TrendPoint>, AppError> {
    let rows = sqlx::query_as::<_, TrendPoint>(
        r#"
        SELECT
            o.order_date::date AS order_date,
            COUNT(DISTINCT o.order_id) AS num_orders,
            SUM(ot.quantity) AS units_sold,
            ROUND(SUM(ot.quantity * ot.list_price * (1 - ot.discount))::numeric, 2)::float8
                AS daily_revenue
        FROM orders o
        JOIN order_items ot ON o.order_id = ot.order_id
        WHERE o.order_status = 4
        GROUP BY o.order_date::date
        ORDER BY o.order_date::date
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Stock level per (store, product), shortages first. Status labels are
/// classified here rather than in SQL so filters and exports share one
/// threshold table.
pub async fn inventory_status(pool: &PgPool) -> Result<Vec<InventoryItem>, AppError> {
    let rows = sqlx::query_as::<_, InventoryRow>(
        r#"
        SELECT
            st.store_name,
            p.product_name,
            c.category_name,
            s.quantity
        FROM stocks s
        JOIN stores st ON s.store_id = st.store_id
        JOIN products p ON s.product_id = p.product_id
        JOIN categories c ON p.category_id = c.category_id
        ORDER BY s.quantity ASC, st.store_name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| InventoryItem {
            status: StockStatus::classify(r.quantity),
            store_name: r.store_name,
            product_name: r.product_name,
            category_name: r.category_name,
            quantity: r.quantity,
        })
        .collect())
}

/// Order counts per raw status code, mapped through the fixed label table.
pub async fn order_status_distribution(pool: &PgPool) -> Result<Vec<OrderStatusCount>, AppError> {
    let rows = sqlx::query_as::<_, StatusRow>(
        r#"
        SELECT order_status, COUNT(*) AS count
        FROM orders
        GROUP BY order_status
        ORDER BY order_status
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| OrderStatusCount {
            status_code: r.order_status,
            status_name: OrderStatus::label(r.order_status).to_string(),
            count: r.count,
        })
        .collect())
}

/// Per-brand product count, units, average list price, and revenue. Brands
/// whose products have no completed sales keep their row with null units and
/// revenue; the completed-order filter lives inside the joined subquery so
/// the outer join cannot drop them.
pub async fn brand_performance(pool: &PgPool) -> Result<Vec<BrandPerformance>, AppError> {
    let rows = sqlx::query_as::<_, BrandPerformance>(
        r#"
        SELECT
            b.brand_name,
            COUNT(DISTINCT p.product_id) AS num_products,
            SUM(sold.quantity) AS units_sold,
            ROUND(AVG(p.list_price)::numeric, 2)::float8 AS avg_price,
            ROUND(SUM(sold.quantity * sold.list_price * (1 - sold.discount))::numeric, 2)::float8
                AS revenue
        FROM brands b
        JOIN products p ON b.brand_id = p.brand_id
        LEFT JOIN (
            SELECT ot.product_id, ot.quantity, ot.list_price, ot.discount
            FROM order_items ot
            JOIN orders o ON ot.order_id = o.order_id
            WHERE o.order_status = 4
        ) sold ON p.product_id = sold.product_id
        GROUP BY b.brand_name
        ORDER BY revenue DESC NULLS LAST
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
