//! Derived order summary
//!
//! Computed by the core after every selection mutation; never persisted.
//! All totals are written by the aggregator from decimal arithmetic, never
//! authored by hand.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::selection::Selection;

/// Aggregated counts and subtotal for one beneficiary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BeneficiaryTotals {
    /// Display name, for the breakdown table
    pub name: String,
    pub lunch_count: u32,
    pub snack_count: u32,
    pub subtotal: f64,
}

/// Aggregated view over the current selections.
///
/// Invariant: `total` equals the sum of all `per_beneficiary` subtotals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub total_lunches: u32,
    pub total_snacks: u32,
    pub subtotal_lunch: f64,
    pub subtotal_snack: f64,
    pub total: f64,
    /// The selections the summary was computed from, sorted by date
    pub selections: Vec<Selection>,
    /// Breakdown keyed by beneficiary key (BTreeMap for stable iteration)
    pub per_beneficiary: BTreeMap<String, BeneficiaryTotals>,
}

impl OrderSummary {
    /// True when there is nothing to pay for.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
