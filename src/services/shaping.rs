//! Derived metrics computed over materialized query results.
//!
//! Everything here is a pure function of its inputs. Ratios are guarded
//! against empty denominators and come back as 0 rather than NaN; the growth
//! block is omitted entirely when it cannot be computed.

use serde::{Deserialize, Serialize};

use crate::services::metrics::{StoreSales, TrendPoint};

/// Trailing window for the smoothed revenue series.
pub const MOVING_AVERAGE_WINDOW: usize = 7;

/// Number of leading/trailing points compared for the growth rate.
pub const GROWTH_WINDOW: usize = 7;

/// Round a currency or ratio value to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A trend point plus its trailing moving average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedTrendPoint {
    pub order_date: chrono::NaiveDate,
    pub num_orders: i64,
    pub units_sold: i64,
    pub daily_revenue: f64,
    pub moving_average: f64,
}

/// Aggregate statistics over a (possibly filtered) trend range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub total_revenue: f64,
    pub avg_daily_revenue: f64,
    pub max_daily_revenue: f64,
    pub total_orders: i64,
    pub total_units: i64,
    pub avg_order_value: f64,
}

/// First-window vs last-window revenue comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    pub first_period_revenue: f64,
    pub last_period_revenue: f64,
    pub growth_pct: f64,
}

/// Everything the trend page needs: smoothed points, range statistics, and
/// the growth block when defined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub points: Vec<SmoothedTrendPoint>,
    pub summary: TrendSummary,
    pub growth: Option<GrowthSummary>,
}

/// Store sales enriched with per-order ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePerformance {
    pub store_name: String,
    pub city: String,
    pub state: String,
    pub total_orders: i64,
    pub units_sold: i64,
    pub revenue: f64,
    pub avg_order_value: f64,
    pub avg_units_per_order: f64,
}

/// Attach the trailing moving average to a date-ordered revenue series.
/// Points with fewer than `MOVING_AVERAGE_WINDOW` predecessors average over
/// however many points are available, so the first point equals itself.
pub fn with_moving_average(points: &[TrendPoint]) -> Vec<SmoothedTrendPoint> {
    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let window_start = (i + 1).saturating_sub(MOVING_AVERAGE_WINDOW);
            let window = &points[window_start..=i];
            let mean =
                window.iter().map(|p| p.daily_revenue).sum::<f64>() / window.len() as f64;
            SmoothedTrendPoint {
                order_date: point.order_date,
                num_orders: point.num_orders,
                units_sold: point.units_sold,
                daily_revenue: point.daily_revenue,
                moving_average: round2(mean),
            }
        })
        .collect()
}

/// Summarize a trend range. An empty range yields all zeros.
pub fn trend_summary(points: &[TrendPoint]) -> TrendSummary {
    if points.is_empty() {
        return TrendSummary::default();
    }

    let total_revenue: f64 = points.iter().map(|p| p.daily_revenue).sum();
    let total_orders: i64 = points.iter().map(|p| p.num_orders).sum();
    let total_units: i64 = points.iter().map(|p| p.units_sold).sum();
    let max_daily_revenue = points
        .iter()
        .map(|p| p.daily_revenue)
        .fold(f64::MIN, f64::max);
    let avg_order_value = if total_orders > 0 {
        total_revenue / total_orders as f64
    } else {
        0.0
    };

    TrendSummary {
        total_revenue: round2(total_revenue),
        avg_daily_revenue: round2(total_revenue / points.len() as f64),
        max_daily_revenue: round2(max_daily_revenue),
        total_orders,
        total_units,
        avg_order_value: round2(avg_order_value),
    }
}

/// Compare the first and last `GROWTH_WINDOW` points of a range. Undefined
/// (and therefore skipped) for ranges shorter than 2 points or when the
/// first-period revenue is zero.
pub fn growth_rate(points: &[TrendPoint]) -> Option<GrowthSummary> {
    if points.len() < 2 {
        return None;
    }

    let window = GROWTH_WINDOW.min(points.len());
    let first: f64 = points[..window].iter().map(|p| p.daily_revenue).sum();
    let last: f64 = points[points.len() - window..]
        .iter()
        .map(|p| p.daily_revenue)
        .sum();

    if first == 0.0 {
        return None;
    }

    Some(GrowthSummary {
        first_period_revenue: round2(first),
        last_period_revenue: round2(last),
        growth_pct: round2((last - first) / first * 100.0),
    })
}

/// Assemble the full trend report over an already-filtered range.
pub fn trend_report(points: &[TrendPoint]) -> TrendReport {
    TrendReport {
        summary: trend_summary(points),
        growth: growth_rate(points),
        points: with_moving_average(points),
    }
}

/// Enrich store sales rows with average order value and average units per
/// order, both 0 when the store has no orders.
pub fn store_performance(rows: Vec<StoreSales>) -> Vec<StorePerformance> {
    rows.into_iter()
        .map(|r| {
            let (avg_order_value, avg_units_per_order) = if r.total_orders > 0 {
                (
                    round2(r.revenue / r.total_orders as f64),
                    round2(r.units_sold as f64 / r.total_orders as f64),
                )
            } else {
                (0.0, 0.0)
            };
            StorePerformance {
                store_name: r.store_name,
                city: r.city,
                state: r.state,
                total_orders: r.total_orders,
                units_sold: r.units_sold,
                revenue: r.revenue,
                avg_order_value,
                avg_units_per_order,
            }
        })
        .collect()
}
