//! Query parameter types shared across metric endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::stock::StockStatus;

/// Row limit for top-N endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopQuery {
    pub limit: Option<i64>,
}

impl TopQuery {
    /// Maximum rows a caller may request.
    const MAX_LIMIT: i64 = 100;

    /// Default when no limit is supplied.
    const DEFAULT_LIMIT: i64 = 10;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

/// Inclusive calendar date range; either bound may be open.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRangeQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(AppError::Validation(
                    "start_date must not be after end_date".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Optional store / stock-status filters for inventory endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryQuery {
    pub store: Option<String>,
    pub status: Option<StockStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_query_defaults_to_ten() {
        assert_eq!(TopQuery::default().limit(), 10);
    }

    #[test]
    fn top_query_clamps_out_of_range() {
        assert_eq!(TopQuery { limit: Some(500) }.limit(), 100);
        assert_eq!(TopQuery { limit: Some(0) }.limit(), 1);
        assert_eq!(TopQuery { limit: Some(-3) }.limit(), 1);
    }

    #[test]
    fn date_range_accepts_equal_bounds() {
        let d = NaiveDate::from_ymd_opt(2018, 4, 1).unwrap();
        let range = DateRangeQuery {
            start_date: Some(d),
            end_date: Some(d),
        };
        assert!(range.validate().is_ok());
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let range = DateRangeQuery {
            start_date: NaiveDate::from_ymd_opt(2018, 4, 2),
            end_date: NaiveDate::from_ymd_opt(2018, 4, 1),
        };
        assert!(matches!(range.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn inventory_status_param_parses_label() {
        let q: InventoryQuery =
            serde_json::from_str(r#"{"store":"Baldwin Bikes","status":"Out of Stock"}"#).unwrap();
        assert_eq!(q.status, Some(StockStatus::OutOfStock));
    }
}
