//! Beneficiary of a menu selection

use serde::{Deserialize, Serialize};

/// Grouping key used for the staff account holder, who has no dependent id.
pub const SELF_KEY: &str = "self";

/// The person a menu selection is made for: the staff account holder
/// ordering for themselves, or one of a guardian's registered dependents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Beneficiary {
    /// The staff member, implicit and without an id
    Staff,
    /// A guardian's registered dependent
    Dependent {
        id: String,
        name: String,
        /// Class/course label (e.g. "3B")
        course: String,
    },
}

impl Beneficiary {
    /// Grouping key: the dependent's id, or the `"self"` sentinel for the
    /// staff member. A grouping key, not an identity guarantee.
    pub fn key(&self) -> &str {
        match self {
            Beneficiary::Staff => SELF_KEY,
            Beneficiary::Dependent { id, .. } => id,
        }
    }

    /// Name shown in summaries and conflict messages.
    pub fn display_name(&self) -> &str {
        match self {
            Beneficiary::Staff => "Staff",
            Beneficiary::Dependent { name, .. } => name,
        }
    }
}
