//! Submission payload construction
//!
//! Flattens one week's selections into order-service line items, grouped by
//! beneficiary then date, with a decimal-accurate total.

use rust_decimal::Decimal;
use shared::models::{MealCategory, Selection, SubmitLineItem, SubmitOrderRequest};

use crate::common::money::{to_decimal, to_f64};
use crate::common::time;
use crate::week::WeekGroup;

/// Build the submission payload for one week.
pub fn build_request(user_id: &str, week: &WeekGroup) -> SubmitOrderRequest {
    let mut selections: Vec<&Selection> = week.selections.iter().collect();
    selections.sort_by(|a, b| {
        (a.beneficiary_key(), a.date.as_str()).cmp(&(b.beneficiary_key(), b.date.as_str()))
    });

    let mut line_items = Vec::new();
    let mut total = Decimal::ZERO;

    for selection in selections {
        for category in [MealCategory::Lunch, MealCategory::Snack] {
            let Some(item) = selection.item(category) else {
                continue;
            };
            total += to_decimal(item.price);
            line_items.push(SubmitLineItem {
                date: selection.date.clone(),
                beneficiary_key: selection.beneficiary_key().to_string(),
                beneficiary_name: selection.beneficiary.display_name().to_string(),
                category,
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                price: item.price,
            });
        }
    }

    SubmitOrderRequest {
        user_id: user_id.to_string(),
        week_start: time::to_iso(week.week_start),
        line_items,
        total: to_f64(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::week::partition_by_week;
    use shared::models::{Beneficiary, MenuItemRef};

    fn child(n: u32) -> Beneficiary {
        Beneficiary::Dependent {
            id: format!("child-{}", n),
            name: format!("Child {}", n),
            course: "3B".to_string(),
        }
    }

    fn selection(date: &str, beneficiary: Beneficiary, lunch: f64) -> Selection {
        let mut s = Selection::new(date, beneficiary);
        s.set_item(
            MealCategory::Lunch,
            Some(MenuItemRef::new("menu-1", "A1", "Lentils", lunch)),
        );
        s
    }

    #[test]
    fn test_line_items_grouped_by_beneficiary_then_date() {
        let selections = vec![
            selection("2024-03-05", child(2), 5000.0),
            selection("2024-03-04", child(1), 5000.0),
            selection("2024-03-04", child(2), 5000.0),
        ];
        let weeks = partition_by_week(&selections).unwrap();
        let request = build_request("user-1", &weeks[0]);

        let order: Vec<(String, String)> = request
            .line_items
            .iter()
            .map(|li| (li.beneficiary_key.clone(), li.date.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("child-1".to_string(), "2024-03-04".to_string()),
                ("child-2".to_string(), "2024-03-04".to_string()),
                ("child-2".to_string(), "2024-03-05".to_string()),
            ]
        );
        assert_eq!(request.week_start, "2024-03-04");
        assert_eq!(request.total, 15000.0);
        assert_eq!(request.user_id, "user-1");
    }

    #[test]
    fn test_both_slots_become_two_line_items() {
        let mut s = selection("2024-03-04", child(1), 5000.0);
        s.set_item(
            MealCategory::Snack,
            Some(MenuItemRef::new("menu-2", "S1", "Fruit", 2000.0)),
        );
        let weeks = partition_by_week(&[s]).unwrap();
        let request = build_request("user-1", &weeks[0]);

        assert_eq!(request.line_items.len(), 2);
        assert_eq!(request.line_items[0].category, MealCategory::Lunch);
        assert_eq!(request.line_items[1].category, MealCategory::Snack);
        assert_eq!(request.total, 7000.0);
    }

    #[test]
    fn test_prices_are_the_selection_snapshots() {
        // The request carries the price captured at selection time
        let weeks = partition_by_week(&[selection("2024-03-04", child(1), 4750.0)]).unwrap();
        let request = build_request("user-1", &weeks[0]);
        assert_eq!(request.line_items[0].price, 4750.0);
        assert_eq!(request.total, 4750.0);
    }
}
