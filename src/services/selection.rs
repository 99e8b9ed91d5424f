//! Client-side filtering and selection over materialized result sets.
//!
//! Nothing here re-queries the store: every function narrows, sorts, or
//! re-aggregates rows that a metric query already fetched.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::stock::StockStatus;
use crate::services::metrics::{CustomerSpend, InventoryItem, TrendPoint};
use crate::services::shaping::round2;

/// Cities kept by the geographic city rollup.
pub const CITY_ROLLUP_LIMIT: usize = 10;

/// Inventory counts per derived stock status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub out_of_stock: i64,
    pub low_stock: i64,
    pub in_stock: i64,
}

/// Customer count and spend for one geographic region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBreakdown {
    pub region: String,
    pub num_customers: i64,
    pub total_spent: f64,
}

/// Keep inventory rows matching the given store name and/or stock status.
pub fn filter_inventory(
    items: Vec<InventoryItem>,
    store: Option<&str>,
    status: Option<StockStatus>,
) -> Vec<InventoryItem> {
    items
        .into_iter()
        .filter(|item| store.map_or(true, |s| item.store_name == s))
        .filter(|item| status.map_or(true, |s| item.status == s))
        .collect()
}

/// Count filtered inventory rows per stock status.
pub fn inventory_summary(items: &[InventoryItem]) -> InventorySummary {
    let mut summary = InventorySummary::default();
    for item in items {
        match item.status {
            StockStatus::OutOfStock => summary.out_of_stock += 1,
            StockStatus::LowStock => summary.low_stock += 1,
            StockStatus::InStock => summary.in_stock += 1,
        }
    }
    summary
}

/// Keep trend points inside the inclusive `[start, end]` range; an open bound
/// keeps that side unbounded.
pub fn filter_date_range(
    points: Vec<TrendPoint>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<TrendPoint> {
    points
        .into_iter()
        .filter(|p| start.map_or(true, |s| p.order_date >= s))
        .filter(|p| end.map_or(true, |e| p.order_date <= e))
        .collect()
}

/// Sort descending by `value` and keep the first `n` rows. Ties are broken by
/// `tie` ascending so the selection is deterministic regardless of input
/// order.
pub fn top_n_by<T, K, V, S>(mut rows: Vec<T>, n: usize, value: V, tie: S) -> Vec<T>
where
    V: Fn(&T) -> f64,
    S: Fn(&T) -> K,
    K: Ord,
{
    rows.sort_by(|a, b| {
        value(b)
            .partial_cmp(&value(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| tie(a).cmp(&tie(b)))
    });
    rows.truncate(n);
    rows
}

fn rollup<F>(customers: &[CustomerSpend], region_of: F) -> Vec<GeoBreakdown>
where
    F: Fn(&CustomerSpend) -> &str,
{
    let mut groups: BTreeMap<String, (i64, f64)> = BTreeMap::new();
    for customer in customers {
        let entry = groups.entry(region_of(customer).to_string()).or_default();
        entry.0 += 1;
        entry.1 += customer.total_spent;
    }
    let mut rows: Vec<GeoBreakdown> = groups
        .into_iter()
        .map(|(region, (num_customers, spent))| GeoBreakdown {
            region,
            num_customers,
            total_spent: round2(spent),
        })
        .collect();
    // Busiest regions first; region name settles ties.
    rows.sort_by(|a, b| {
        b.num_customers
            .cmp(&a.num_customers)
            .then_with(|| a.region.cmp(&b.region))
    });
    rows
}

/// Re-aggregate a customer result set by state: distinct customer count and
/// spend sum per state, busiest first.
pub fn rollup_by_state(customers: &[CustomerSpend]) -> Vec<GeoBreakdown> {
    rollup(customers, |c| &c.state)
}

/// Same as [`rollup_by_state`] by city, truncated to the top
/// [`CITY_ROLLUP_LIMIT`] cities by customer count.
pub fn rollup_by_city(customers: &[CustomerSpend]) -> Vec<GeoBreakdown> {
    top_n_by(
        rollup(customers, |c| &c.city),
        CITY_ROLLUP_LIMIT,
        |r| r.num_customers as f64,
        |r| r.region.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(store: &str, quantity: i32) -> InventoryItem {
        InventoryItem {
            store_name: store.to_string(),
            product_name: "Trek 820".to_string(),
            category_name: "Mountain Bikes".to_string(),
            quantity,
            status: StockStatus::classify(quantity),
        }
    }

    fn customer(id: i32, city: &str, state: &str, spent: f64) -> CustomerSpend {
        CustomerSpend {
            customer_id: id,
            customer_name: format!("Customer {id}"),
            email: format!("c{id}@example.com"),
            city: city.to_string(),
            state: state.to_string(),
            total_orders: 1,
            total_spent: spent,
        }
    }

    fn point(day: u32, revenue: f64) -> TrendPoint {
        TrendPoint {
            order_date: NaiveDate::from_ymd_opt(2018, 4, day).unwrap(),
            num_orders: 1,
            units_sold: 1,
            daily_revenue: revenue,
        }
    }

    #[test]
    fn filter_inventory_by_store_and_status() {
        let items = vec![item("Baldwin Bikes", 0), item("Baldwin Bikes", 20), item("Santa Cruz Bikes", 0)];

        let by_store = filter_inventory(items.clone(), Some("Baldwin Bikes"), None);
        assert_eq!(by_store.len(), 2);

        let by_both = filter_inventory(items, Some("Baldwin Bikes"), Some(StockStatus::OutOfStock));
        assert_eq!(by_both.len(), 1);
        assert_eq!(by_both[0].quantity, 0);
    }

    #[test]
    fn filter_inventory_without_filters_keeps_everything() {
        let items = vec![item("Baldwin Bikes", 3), item("Santa Cruz Bikes", 12)];
        assert_eq!(filter_inventory(items, None, None).len(), 2);
    }

    #[test]
    fn inventory_summary_counts_by_status() {
        let items = vec![item("A", 0), item("A", 5), item("A", 5), item("A", 15)];
        let summary = inventory_summary(&items);
        assert_eq!(
            summary,
            InventorySummary {
                out_of_stock: 1,
                low_stock: 2,
                in_stock: 1,
            }
        );
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let points = vec![point(1, 10.0), point(2, 20.0), point(3, 30.0)];
        let filtered = filter_date_range(
            points,
            NaiveDate::from_ymd_opt(2018, 4, 1),
            NaiveDate::from_ymd_opt(2018, 4, 2),
        );
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[1].daily_revenue, 20.0);
    }

    #[test]
    fn date_range_open_bounds() {
        let points = vec![point(1, 10.0), point(2, 20.0)];
        let filtered = filter_date_range(points, None, NaiveDate::from_ymd_opt(2018, 4, 1));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn top_n_orders_descending_and_truncates() {
        let rows = vec![("a", 50.0), ("b", 30.0), ("c", 80.0)];
        let top = top_n_by(rows, 2, |r| r.1, |r| r.0);
        assert_eq!(top, vec![("c", 80.0), ("a", 50.0)]);
    }

    #[test]
    fn top_n_breaks_ties_on_secondary_key() {
        let rows = vec![("zeta", 40.0), ("alpha", 40.0), ("mid", 40.0)];
        let top = top_n_by(rows, 2, |r| r.1, |r| r.0);
        assert_eq!(top, vec![("alpha", 40.0), ("mid", 40.0)]);
    }

    #[test]
    fn state_rollup_counts_and_sums() {
        let customers = vec![
            customer(1, "New York", "NY", 100.0),
            customer(2, "Buffalo", "NY", 50.5),
            customer(3, "Austin", "TX", 75.0),
        ];
        let rollup = rollup_by_state(&customers);
        assert_eq!(rollup.len(), 2);
        assert_eq!(rollup[0].region, "NY");
        assert_eq!(rollup[0].num_customers, 2);
        assert_eq!(rollup[0].total_spent, 150.5);
        assert_eq!(rollup[1].region, "TX");
    }

    #[test]
    fn city_rollup_truncates_to_top_ten() {
        let mut customers = Vec::new();
        for i in 0..12 {
            // City 0 gets 13 customers, city 1 gets 12, and so on.
            for j in 0..(13 - i) {
                customers.push(customer(i * 100 + j, &format!("City {i}"), "CA", 10.0));
            }
        }
        let rollup = rollup_by_city(&customers);
        assert_eq!(rollup.len(), CITY_ROLLUP_LIMIT);
        assert_eq!(rollup[0].region, "City 0");
        assert_eq!(rollup[0].num_customers, 13);
    }
}
