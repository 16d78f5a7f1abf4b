//! Duplicate order detection
//!
//! Cross-references one week's pending selections against orders already
//! submitted for that week, so a family is never charged twice for the same
//! date/beneficiary/category. Pure read-side check: it must be re-run
//! freshly right before submission (paid state can change under us from
//! another tab or a payment webhook) and is best-effort only — the external
//! order service remains the final authority at submission time.

use std::fmt;

use serde::Serialize;
use shared::models::{ExistingOrder, MealCategory, OrderStatus, Selection};

/// A pending line that a paid order already covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub date: String,
    pub beneficiary_name: String,
    pub category: MealCategory,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} already paid for {} on {}",
            self.category.label(),
            self.beneficiary_name,
            self.date
        )
    }
}

/// Outcome of the pre-submission duplicate check for one week.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConflictReport {
    pub conflicts: Vec<Conflict>,
}

impl ConflictReport {
    pub fn has_conflict(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// All conflicts joined into one user-facing message.
    pub fn describe(&self) -> String {
        self.conflicts
            .iter()
            .map(Conflict::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Check one week's pending selections against that week's existing orders.
///
/// Only `Paid` orders block; a pending or cancelled prior attempt must not
/// prevent retrying. Each set slot (lunch, snack) is checked independently.
pub fn check_week(pending: &[Selection], existing: &[ExistingOrder]) -> ConflictReport {
    let paid: Vec<&ExistingOrder> = existing
        .iter()
        .filter(|order| order.status == OrderStatus::Paid)
        .collect();

    let mut conflicts = Vec::new();
    for selection in pending {
        for category in [MealCategory::Lunch, MealCategory::Snack] {
            if selection.item(category).is_none() {
                continue;
            }
            let covered = paid
                .iter()
                .any(|order| order.has_line(&selection.date, selection.beneficiary_key(), category));
            if covered {
                conflicts.push(Conflict {
                    date: selection.date.clone(),
                    beneficiary_name: selection.beneficiary.display_name().to_string(),
                    category,
                });
            }
        }
    }

    ConflictReport { conflicts }
}
