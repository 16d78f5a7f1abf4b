//! Previously submitted orders, as reported by the external order service

use serde::{Deserialize, Serialize};

use super::selection::MealCategory;

/// Lifecycle status of a submitted order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Submitted but not yet paid; never blocks a retry
    Pending,
    /// Paid; participates in duplicate detection
    Paid,
    /// Cancelled; never blocks a retry
    Cancelled,
}

/// One priced line of an existing order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    /// Service day (`YYYY-MM-DD`)
    pub date: String,
    pub beneficiary_key: String,
    pub beneficiary_name: String,
    pub category: MealCategory,
    pub item_name: String,
    pub price: f64,
}

/// A previously submitted order. Read-only to the core: the external order
/// service is the system of record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExistingOrder {
    pub id: String,
    pub status: OrderStatus,
    /// Monday of the week this order covers (`YYYY-MM-DD`)
    pub week_start: String,
    pub items: Vec<OrderLineItem>,
}

impl ExistingOrder {
    /// True when this order contains a line for the given triple.
    pub fn has_line(&self, date: &str, beneficiary_key: &str, category: MealCategory) -> bool {
        self.items.iter().any(|item| {
            item.date == date && item.beneficiary_key == beneficiary_key && item.category == category
        })
    }
}
