//! Per-day, per-beneficiary menu selection

use serde::{Deserialize, Serialize};

use super::beneficiary::Beneficiary;
use super::menu_item::MenuItemRef;

/// Meal category of a selection slot or order line item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealCategory {
    Lunch,
    Snack,
}

impl MealCategory {
    /// Lowercase label for user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            MealCategory::Lunch => "lunch",
            MealCategory::Snack => "snack",
        }
    }
}

/// One beneficiary's choice for one service day.
///
/// Lunch and snack are independent: either, both, or neither may be set.
/// A selection with both slots empty is logically absent; the store removes
/// it instead of keeping it empty.
///
/// `date` stays a raw `YYYY-MM-DD` string as received from the UI; it is
/// validated when selections are partitioned into weeks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Selection {
    /// Service day (`YYYY-MM-DD`)
    pub date: String,
    pub beneficiary: Beneficiary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<MenuItemRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snack: Option<MenuItemRef>,
}

impl Selection {
    pub fn new(date: impl Into<String>, beneficiary: Beneficiary) -> Self {
        Self {
            date: date.into(),
            beneficiary,
            lunch: None,
            snack: None,
        }
    }

    /// Grouping key of the beneficiary this selection belongs to.
    pub fn beneficiary_key(&self) -> &str {
        self.beneficiary.key()
    }

    pub fn item(&self, category: MealCategory) -> Option<&MenuItemRef> {
        match category {
            MealCategory::Lunch => self.lunch.as_ref(),
            MealCategory::Snack => self.snack.as_ref(),
        }
    }

    pub fn set_item(&mut self, category: MealCategory, item: Option<MenuItemRef>) {
        match category {
            MealCategory::Lunch => self.lunch = item,
            MealCategory::Snack => self.snack = item,
        }
    }

    /// True when both slots are unset; such a selection must not be stored.
    pub fn is_empty(&self) -> bool {
        self.lunch.is_none() && self.snack.is_none()
    }
}
