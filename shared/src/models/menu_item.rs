//! Menu item types

use serde::{Deserialize, Serialize};

/// A menu item as chosen at selection time.
///
/// The price is a snapshot: later menu price changes never retroactively
/// alter an in-progress order session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItemRef {
    /// Menu item ID
    pub id: String,
    /// Kitchen/menu code (e.g. "A1")
    pub code: String,
    /// Display name
    pub name: String,
    /// Price snapshot at selection time
    pub price: f64,
    /// Optional description shown on the menu card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MenuItemRef {
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            price,
            description: None,
        }
    }
}

/// Lunch and snack options offered for one service day.
///
/// Returned by the menu collaborator; deterministic for a given date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayMenu {
    pub lunch_options: Vec<MenuItemRef>,
    pub snack_options: Vec<MenuItemRef>,
}

/// Resolved week boundaries for a date, as reported by the menu collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekInfo {
    /// Monday of the week (`YYYY-MM-DD`)
    pub week_start: String,
    /// Sunday of the week (`YYYY-MM-DD`)
    pub week_end: String,
    /// Human-readable label for pickers and receipts
    pub label: String,
}
