//! Ordering session context
//!
//! Explicit per-session state object replacing the ambient global selection
//! store of earlier designs: created at session start, reset on logout or
//! once every week has been paid. Owns the user identity, the selection
//! store, and the optional session continuity mirror.
//!
//! Mirror writes are best-effort: a failed save is logged and the
//! in-memory state stays authoritative for the rest of the session.

use shared::models::{
    AccountKind, Beneficiary, MealCategory, MenuItemRef, OrderSummary, Selection, UserIdentity,
};

use crate::common::error::{CoreError, CoreResult};
use crate::selection::persist::SelectionMirror;
use crate::selection::store::SelectionStore;
use crate::services::SessionStore;
use crate::summary::summarize;

#[derive(Debug)]
pub struct OrderingSession {
    user: UserIdentity,
    store: SelectionStore,
    mirror: Option<SelectionMirror>,
}

impl OrderingSession {
    /// Fresh session with no persistence mirror.
    pub fn new(user: UserIdentity) -> Self {
        Self {
            user,
            store: SelectionStore::new(),
            mirror: None,
        }
    }

    /// Session for whoever the session store reports as logged in.
    pub fn from_session(store: &dyn SessionStore) -> CoreResult<Self> {
        let user = store
            .current_user()
            .ok_or_else(|| CoreError::validation("Not logged in"))?;
        Ok(Self::new(user))
    }

    /// Session backed by a mirror; any selections persisted for this user
    /// in a previous session are restored.
    pub fn with_mirror(user: UserIdentity, mirror: SelectionMirror) -> CoreResult<Self> {
        let restored = mirror.load(&user.user_id)?;
        let mut store = SelectionStore::new();
        store.replace_all(restored);
        tracing::debug!(user_id = %user.user_id, restored = store.len(), "Session restored");
        Ok(Self {
            user,
            store,
            mirror: Some(mirror),
        })
    }

    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    /// Set a lunch or snack choice.
    ///
    /// The beneficiary must belong to this session's account: staff order
    /// for themselves only, guardians only for registered dependents.
    pub fn select(
        &mut self,
        date: &str,
        beneficiary: &Beneficiary,
        category: MealCategory,
        item: MenuItemRef,
    ) -> CoreResult<()> {
        self.check_beneficiary(beneficiary)?;
        self.store.upsert(date, beneficiary, category, item);
        self.sync_mirror();
        Ok(())
    }

    /// Clear one slot, or the whole selection when `category` is `None`.
    pub fn deselect(&mut self, date: &str, beneficiary_key: &str, category: Option<MealCategory>) {
        self.store.clear(date, beneficiary_key, category);
        self.sync_mirror();
    }

    /// Current selections, sorted for display.
    pub fn selections(&self) -> Vec<Selection> {
        self.store.all()
    }

    /// Display totals over the current selections.
    pub fn summary(&self) -> OrderSummary {
        summarize(&self.store.all())
    }

    /// Drop the selections for the given service dates after their week has
    /// been successfully submitted.
    pub fn clear_submitted_week(&mut self, dates: &[String]) {
        self.store.remove_dates(dates);
        self.sync_mirror();
    }

    /// End-of-session reset: empties the store and the mirrored entry.
    pub fn reset(&mut self) {
        self.store.clear_all();
        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.clear(&self.user.user_id) {
                tracing::warn!(user_id = %self.user.user_id, error = %e, "Failed to clear selection mirror");
            }
        }
    }

    fn check_beneficiary(&self, beneficiary: &Beneficiary) -> CoreResult<()> {
        match (self.user.kind, beneficiary) {
            (AccountKind::Staff, Beneficiary::Staff) => Ok(()),
            (AccountKind::Staff, Beneficiary::Dependent { .. }) => Err(CoreError::validation(
                "Staff accounts order for themselves only",
            )),
            (AccountKind::Guardian, Beneficiary::Staff) => Err(CoreError::validation(
                "Guardian accounts order for registered dependents",
            )),
            (AccountKind::Guardian, Beneficiary::Dependent { id, .. }) => {
                if self.user.dependent(id).is_some() {
                    Ok(())
                } else {
                    Err(CoreError::Validation(format!(
                        "Dependent {} is not registered to this account",
                        id
                    )))
                }
            }
        }
    }

    fn sync_mirror(&self) {
        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.save(&self.user.user_id, &self.store.all()) {
                tracing::warn!(user_id = %self.user.user_id, error = %e, "Failed to mirror selections");
            }
        }
    }
}
