//! Menu planning facade
//!
//! Thin wrapper over the [`MenuService`] collaborator used by the UI layer:
//! resolve week boundaries for pickers and validate that a chosen item is
//! actually offered for a date and category before it enters the store.

use shared::models::{DayMenu, MealCategory, MenuItemRef, WeekInfo};

use crate::common::error::{CoreError, CoreResult};
use crate::common::time;
use crate::services::MenuService;

pub struct MenuPlanner<M> {
    menu: M,
}

impl<M: MenuService> MenuPlanner<M> {
    pub fn new(menu: M) -> Self {
        Self { menu }
    }

    /// Week boundaries for the week containing `date`.
    pub async fn week_of(&self, date: &str) -> CoreResult<WeekInfo> {
        time::parse_date(date)?;
        self.menu.resolve_week(date).await
    }

    /// Options offered on `date`.
    pub async fn day_menu(&self, date: &str) -> CoreResult<DayMenu> {
        time::parse_date(date)?;
        self.menu.day_menu(date).await
    }

    /// Look up `item_id` among the options offered on `date` for the given
    /// category, so only items actually on that day's menu enter the store.
    pub async fn validated_item(
        &self,
        date: &str,
        category: MealCategory,
        item_id: &str,
    ) -> CoreResult<MenuItemRef> {
        let menu = self.day_menu(date).await?;
        let options = match category {
            MealCategory::Lunch => &menu.lunch_options,
            MealCategory::Snack => &menu.snack_options,
        };
        options
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or_else(|| {
                CoreError::validation(format!(
                    "Item {} is not offered as {} on {}",
                    item_id,
                    category.label(),
                    date
                ))
            })
    }
}
