//! Current user identity, as exposed by the session collaborator

use serde::{Deserialize, Serialize};

use super::beneficiary::Beneficiary;

/// Account type of the current user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    /// Staff member ordering for themselves
    Staff,
    /// Parent/guardian ordering for registered dependents
    Guardian,
}

/// A guardian's registered dependent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dependent {
    pub id: String,
    pub name: String,
    /// Class/course label (e.g. "3B")
    pub course: String,
}

impl Dependent {
    /// The beneficiary this dependent selects meals as.
    pub fn beneficiary(&self) -> Beneficiary {
        Beneficiary::Dependent {
            id: self.id.clone(),
            name: self.name.clone(),
            course: self.course.clone(),
        }
    }
}

/// Current user identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: String,
    pub name: String,
    pub kind: AccountKind,
    /// Registered dependents; empty for staff accounts
    #[serde(default)]
    pub dependents: Vec<Dependent>,
}

impl UserIdentity {
    pub fn staff(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            kind: AccountKind::Staff,
            dependents: Vec::new(),
        }
    }

    pub fn guardian(
        user_id: impl Into<String>,
        name: impl Into<String>,
        dependents: Vec<Dependent>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            kind: AccountKind::Guardian,
            dependents,
        }
    }

    pub fn dependent(&self, id: &str) -> Option<&Dependent> {
        self.dependents.iter().find(|d| d.id == id)
    }
}
