//! Week partitioner
//!
//! Payment is processed per ISO week, so flat selections are grouped by the
//! Monday of the week each `date` falls into. The week is computed from the
//! selection's own date, never from "the current week".

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::models::Selection;

use crate::common::error::CoreResult;
use crate::common::time;

/// Selections sharing one Monday-anchored calendar week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGroup {
    /// Monday of the week
    pub week_start: NaiveDate,
    /// Input order is preserved within the group
    pub selections: Vec<Selection>,
}

impl WeekGroup {
    /// `week_start` as `YYYY-MM-DD`, the key used with the order service.
    pub fn week_start_iso(&self) -> String {
        time::to_iso(self.week_start)
    }

    /// The distinct service dates in this group.
    pub fn dates(&self) -> Vec<String> {
        let mut dates: Vec<String> = self.selections.iter().map(|s| s.date.clone()).collect();
        dates.sort();
        dates.dedup();
        dates
    }
}

/// Partition selections by the Monday of the ISO week containing their date.
///
/// Groups are returned chronologically; every selection lands in exactly one
/// group and input order is preserved inside each group. A date that fails
/// to parse is an input-contract violation: the whole partition fails with
/// [`crate::CoreError::MalformedDate`] rather than dropping or mis-grouping
/// the selection.
pub fn partition_by_week(selections: &[Selection]) -> CoreResult<Vec<WeekGroup>> {
    let mut groups: BTreeMap<NaiveDate, Vec<Selection>> = BTreeMap::new();

    for selection in selections {
        let date = time::parse_date(&selection.date)?;
        groups
            .entry(time::week_start(date))
            .or_default()
            .push(selection.clone());
    }

    Ok(groups
        .into_iter()
        .map(|(week_start, selections)| WeekGroup {
            week_start,
            selections,
        })
        .collect())
}
