//! Stock level classification for inventory rows.

use serde::{Deserialize, Serialize};

/// Quantities below this (and above zero) count as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Derived stock status label for a (store, product) quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "In Stock")]
    InStock,
}

impl StockStatus {
    /// Classify a stock quantity against the fixed thresholds.
    pub fn classify(quantity: i32) -> Self {
        if quantity == 0 {
            Self::OutOfStock
        } else if quantity < LOW_STOCK_THRESHOLD {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::LowStock => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_thresholds() {
        let statuses: Vec<&str> = [0, 5, 15]
            .into_iter()
            .map(|q| StockStatus::classify(q).label())
            .collect();
        assert_eq!(statuses, vec!["Out of Stock", "Low Stock", "In Stock"]);
    }

    #[test]
    fn boundary_quantities() {
        assert_eq!(StockStatus::classify(1), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(9), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(10), StockStatus::InStock);
    }

    #[test]
    fn serde_uses_display_labels() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"Out of Stock\"");
        let back: StockStatus = serde_json::from_str("\"Low Stock\"").unwrap();
        assert_eq!(back, StockStatus::LowStock);
    }
}
