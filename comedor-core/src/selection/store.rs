//! In-memory selection store
//!
//! Keyed map of per-day, per-beneficiary selections. All operations are
//! total over the key space: clearing an absent key or slot is a no-op.
//! Single-writer (the UI event loop); no internal locking.

use std::collections::HashMap;

use shared::models::{Beneficiary, MealCategory, MenuItemRef, Selection};

/// Map key: one beneficiary on one service day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SelectionKey {
    date: String,
    beneficiary_key: String,
}

impl SelectionKey {
    fn new(date: &str, beneficiary_key: &str) -> Self {
        Self {
            date: date.to_string(),
            beneficiary_key: beneficiary_key.to_string(),
        }
    }
}

/// In-memory store of the current selections.
///
/// Invariant: every stored selection has at least one slot set; a selection
/// whose last slot is cleared is removed rather than kept empty.
#[derive(Debug, Default)]
pub struct SelectionStore {
    selections: HashMap<SelectionKey, Selection>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lunch or snack slot for (date, beneficiary), creating the
    /// selection if absent.
    pub fn upsert(
        &mut self,
        date: &str,
        beneficiary: &Beneficiary,
        category: MealCategory,
        item: MenuItemRef,
    ) {
        let key = SelectionKey::new(date, beneficiary.key());
        let selection = self
            .selections
            .entry(key)
            .or_insert_with(|| Selection::new(date, beneficiary.clone()));
        selection.set_item(category, Some(item));
    }

    /// Clear one slot, or the whole selection when `category` is `None`.
    ///
    /// A selection whose last slot is cleared is removed. Absent keys are
    /// no-ops; the operation is idempotent.
    pub fn clear(&mut self, date: &str, beneficiary_key: &str, category: Option<MealCategory>) {
        let key = SelectionKey::new(date, beneficiary_key);
        match category {
            None => {
                self.selections.remove(&key);
            }
            Some(category) => {
                if let Some(selection) = self.selections.get_mut(&key) {
                    selection.set_item(category, None);
                    if selection.is_empty() {
                        self.selections.remove(&key);
                    }
                }
            }
        }
    }

    pub fn get(&self, date: &str, beneficiary_key: &str) -> Option<&Selection> {
        self.selections.get(&SelectionKey::new(date, beneficiary_key))
    }

    /// All non-empty selections, sorted by (date, beneficiary key) for
    /// deterministic display.
    pub fn all(&self) -> Vec<Selection> {
        let mut all: Vec<Selection> = self.selections.values().cloned().collect();
        all.sort_by(|a, b| {
            (a.date.as_str(), a.beneficiary_key()).cmp(&(b.date.as_str(), b.beneficiary_key()))
        });
        all
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Empty the store (logout, completed payment).
    pub fn clear_all(&mut self) {
        self.selections.clear();
    }

    /// Replace the whole content, e.g. when restoring from the session
    /// mirror. Empty selections in the input are dropped, preserving the
    /// store invariant.
    pub fn replace_all(&mut self, selections: Vec<Selection>) {
        self.selections.clear();
        for selection in selections {
            if selection.is_empty() {
                continue;
            }
            let key = SelectionKey::new(&selection.date, selection.beneficiary_key());
            self.selections.insert(key, selection);
        }
    }

    /// Remove every selection belonging to the given week's dates.
    /// Used after a week has been successfully submitted.
    pub fn remove_dates(&mut self, dates: &[String]) {
        self.selections.retain(|key, _| !dates.contains(&key.date));
    }
}
