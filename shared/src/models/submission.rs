//! Submission payloads exchanged with the external order service

use serde::{Deserialize, Serialize};

use super::selection::MealCategory;

/// One priced menu choice for one beneficiary on one date, as submitted to
/// the order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitLineItem {
    /// Service day (`YYYY-MM-DD`)
    pub date: String,
    pub beneficiary_key: String,
    pub beneficiary_name: String,
    pub category: MealCategory,
    pub item_id: String,
    pub item_name: String,
    pub price: f64,
}

/// Request payload for one week's submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitOrderRequest {
    pub user_id: String,
    /// Monday of the week being paid (`YYYY-MM-DD`)
    pub week_start: String,
    /// Line items grouped by beneficiary, then date
    pub line_items: Vec<SubmitLineItem>,
    pub total: f64,
}

/// Result of one week's submission, as reported by the order service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Present on success when the provider expects a redirect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitOutcome {
    pub fn success(order_id: impl Into<String>, payment_url: Option<String>) -> Self {
        Self {
            success: true,
            order_id: Some(order_id.into()),
            payment_url,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            order_id: None,
            payment_url: None,
            error: Some(error.into()),
        }
    }
}
