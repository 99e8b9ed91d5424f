//! Order lifecycle states as stored in `orders.order_status`.

use serde::{Deserialize, Serialize};

/// Order status codes used by the bike store schema. Only `Completed` orders
/// contribute to revenue metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Rejected,
    Completed,
}

impl OrderStatus {
    /// Numeric code stored in the `orders` table.
    pub const fn code(self) -> i16 {
        match self {
            Self::Pending => 1,
            Self::Processing => 2,
            Self::Rejected => 3,
            Self::Completed => 4,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Pending),
            2 => Some(Self::Processing),
            3 => Some(Self::Rejected),
            4 => Some(Self::Completed),
            _ => None,
        }
    }

    /// Display label for a raw status code; unmapped codes are "Unknown".
    pub fn label(code: i16) -> &'static str {
        match Self::from_code(code) {
            Some(Self::Pending) => "Pending",
            Some(Self::Processing) => "Processing",
            Some(Self::Rejected) => "Rejected",
            Some(Self::Completed) => "Completed",
            None => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Rejected,
            OrderStatus::Completed,
        ] {
            assert_eq!(OrderStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn labels_match_fixed_table() {
        let labels: Vec<&str> = [1, 2, 3, 4, 9]
            .into_iter()
            .map(OrderStatus::label)
            .collect();
        assert_eq!(
            labels,
            vec!["Pending", "Processing", "Rejected", "Completed", "Unknown"]
        );
    }
}
