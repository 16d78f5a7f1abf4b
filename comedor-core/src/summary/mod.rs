//! Order summary aggregation
//!
//! Single-pass fold of the current selections into an [`OrderSummary`].
//! Accumulates with `Decimal` internally and writes rounded `f64` totals
//! back, like every monetary computation in this workspace. Prices are the
//! snapshots taken at selection time; nothing is re-fetched here.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use shared::models::{BeneficiaryTotals, OrderSummary, Selection};

use crate::common::money::{to_decimal, to_f64};

#[derive(Default)]
struct BeneficiaryAcc {
    name: String,
    lunch_count: u32,
    snack_count: u32,
    subtotal: Decimal,
}

/// Fold selections into an [`OrderSummary`].
///
/// Pure and deterministic; empty input yields the all-zero summary. The
/// grand total always equals the sum of the per-beneficiary subtotals:
/// every item price feeds both accumulations exactly once.
pub fn summarize(selections: &[Selection]) -> OrderSummary {
    let mut total_lunches = 0u32;
    let mut total_snacks = 0u32;
    let mut subtotal_lunch = Decimal::ZERO;
    let mut subtotal_snack = Decimal::ZERO;
    let mut per_beneficiary: BTreeMap<String, BeneficiaryAcc> = BTreeMap::new();

    for selection in selections {
        let acc = per_beneficiary
            .entry(selection.beneficiary_key().to_string())
            .or_insert_with(|| BeneficiaryAcc {
                name: selection.beneficiary.display_name().to_string(),
                ..Default::default()
            });

        if let Some(lunch) = &selection.lunch {
            let price = to_decimal(lunch.price);
            total_lunches += 1;
            subtotal_lunch += price;
            acc.lunch_count += 1;
            acc.subtotal += price;
        }
        if let Some(snack) = &selection.snack {
            let price = to_decimal(snack.price);
            total_snacks += 1;
            subtotal_snack += price;
            acc.snack_count += 1;
            acc.subtotal += price;
        }
    }

    let mut sorted: Vec<Selection> = selections.to_vec();
    sorted.sort_by(|a, b| {
        (a.date.as_str(), a.beneficiary_key()).cmp(&(b.date.as_str(), b.beneficiary_key()))
    });

    OrderSummary {
        total_lunches,
        total_snacks,
        subtotal_lunch: to_f64(subtotal_lunch),
        subtotal_snack: to_f64(subtotal_snack),
        total: to_f64(subtotal_lunch + subtotal_snack),
        selections: sorted,
        per_beneficiary: per_beneficiary
            .into_iter()
            .map(|(key, acc)| {
                (
                    key,
                    BeneficiaryTotals {
                        name: acc.name,
                        lunch_count: acc.lunch_count,
                        snack_count: acc.snack_count,
                        subtotal: to_f64(acc.subtotal),
                    },
                )
            })
            .collect(),
    }
}
