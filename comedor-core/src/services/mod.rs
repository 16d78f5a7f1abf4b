//! External collaborator contracts
//!
//! The core treats authentication, the menu backend, and the order/payment
//! backend as opaque async services behind these traits. Transport
//! (REST/SDK calls to a managed backend) is an implementation detail of the
//! collaborators; their failures surface as [`CoreError::Service`].
//!
//! [`CoreError::Service`]: crate::CoreError::Service

use async_trait::async_trait;
use shared::models::{DayMenu, ExistingOrder, SubmitOrderRequest, SubmitOutcome, UserIdentity, WeekInfo};

use crate::common::error::CoreResult;

/// Menu backend: week resolution and day menus.
///
/// Both operations must be deterministic for a given date.
#[async_trait]
pub trait MenuService: Send + Sync {
    /// Resolve the week containing `date` (`YYYY-MM-DD`).
    async fn resolve_week(&self, date: &str) -> CoreResult<WeekInfo>;

    /// Lunch and snack options offered on `date`.
    async fn day_menu(&self, date: &str) -> CoreResult<DayMenu>;
}

/// Order backend: submission and order history.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submit one week's order. A transport failure is an `Err`; a rejection
    /// by the provider is an `Ok` outcome with `success == false`.
    async fn submit_order(&self, request: &SubmitOrderRequest) -> CoreResult<SubmitOutcome>;

    /// Orders previously submitted by `user_id` for the week starting at
    /// `week_start` (`YYYY-MM-DD`, a Monday).
    async fn query_orders(&self, user_id: &str, week_start: &str) -> CoreResult<Vec<ExistingOrder>>;
}

/// Session backend: who is ordering.
pub trait SessionStore: Send + Sync {
    /// The authenticated user, or `None` when logged out.
    fn current_user(&self) -> Option<UserIdentity>;
}
