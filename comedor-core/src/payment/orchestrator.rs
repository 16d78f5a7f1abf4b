//! Payment orchestration
//!
//! Sequences one payment attempt over the current selections:
//!
//! ```text
//! Idle → Validating → PerWeekSubmission(i) → Redirecting | Failed
//! ```
//!
//! Weeks are submitted strictly one at a time, awaiting each call before the
//! next, so the stop-at-first-redirect rule is deterministic and a failure
//! in week N never races week N+1's duplicate check. The first successful
//! submission that carries a payment URL ends the attempt: remaining weeks
//! are NOT submitted (single payment-provider redirect model) and stay in
//! the store for a follow-up attempt.

use chrono::NaiveDate;
use shared::models::Selection;
use uuid::Uuid;

use crate::common::error::{CoreError, CoreResult};
use crate::payment::duplicate::{ConflictReport, check_week};
use crate::payment::request::build_request;
use crate::services::OrderService;
use crate::week::{WeekGroup, partition_by_week};

/// Observable phase of the current payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentPhase {
    #[default]
    Idle,
    Validating,
    Submitting {
        week_index: usize,
    },
    Redirecting,
    Failed,
}

/// Record of one week's submission within an attempt.
#[derive(Debug, Clone)]
pub struct WeekSubmission {
    pub week_start: NaiveDate,
    pub success: bool,
    pub order_id: Option<String>,
    pub payment_url: Option<String>,
    pub error: Option<String>,
}

/// Terminal outcome of a payment attempt.
#[derive(Debug, Clone)]
pub enum PaymentOutcome {
    /// A submission returned a payment URL; the caller must navigate there.
    /// `remaining_weeks` were not submitted in this attempt.
    Redirect {
        payment_url: String,
        order_id: Option<String>,
        week_start: NaiveDate,
        submitted: Vec<WeekSubmission>,
        remaining_weeks: Vec<NaiveDate>,
    },
    /// Every week was submitted and at least one succeeded, but no
    /// submission carried a payment URL (e.g. a zero-balance account).
    Completed { submissions: Vec<WeekSubmission> },
    /// Every week failed; `message` aggregates the per-week errors.
    Failed {
        submissions: Vec<WeekSubmission>,
        message: String,
    },
}

/// Orchestrates payment attempts against the external order service.
///
/// Holds no state between attempts: `pay` always re-validates from scratch,
/// so a retry after `Failed` is simply another call.
pub struct PaymentOrchestrator<S> {
    orders: S,
    phase: PaymentPhase,
}

impl<S: OrderService> PaymentOrchestrator<S> {
    pub fn new(orders: S) -> Self {
        Self {
            orders,
            phase: PaymentPhase::Idle,
        }
    }

    pub fn phase(&self) -> &PaymentPhase {
        &self.phase
    }

    /// Run one payment attempt over the given selections.
    ///
    /// Validation errors, malformed dates, and duplicate conflicts abort
    /// before any submission and surface as `Err`. Transient per-week
    /// service failures are recorded and never abort sibling weeks; if every
    /// week fails the attempt ends in [`PaymentOutcome::Failed`].
    pub async fn pay(&mut self, user_id: &str, selections: &[Selection]) -> CoreResult<PaymentOutcome> {
        let attempt_id = Uuid::new_v4();
        tracing::info!(
            %attempt_id,
            user_id,
            selections = selections.len(),
            "Starting payment attempt"
        );

        self.phase = PaymentPhase::Validating;

        if selections.is_empty() {
            self.phase = PaymentPhase::Failed;
            return Err(CoreError::validation("No selections to pay for"));
        }

        let weeks = match partition_by_week(selections) {
            Ok(weeks) => weeks,
            Err(e) => {
                self.phase = PaymentPhase::Failed;
                return Err(e);
            }
        };

        // Duplicate check runs against freshly queried orders on every
        // attempt; paid state can change between page load and now. Any
        // conflict in any week aborts the whole attempt before the first
        // submission.
        match self.validate_weeks(user_id, &weeks).await {
            Ok(()) => {}
            Err(e) => {
                self.phase = PaymentPhase::Failed;
                return Err(e);
            }
        }

        let mut submissions: Vec<WeekSubmission> = Vec::new();

        for (week_index, week) in weeks.iter().enumerate() {
            self.phase = PaymentPhase::Submitting { week_index };
            let request = build_request(user_id, week);
            tracing::info!(
                week_start = %request.week_start,
                line_items = request.line_items.len(),
                total = request.total,
                "Submitting week"
            );

            let record = match self.orders.submit_order(&request).await {
                Ok(outcome) if outcome.success => WeekSubmission {
                    week_start: week.week_start,
                    success: true,
                    order_id: outcome.order_id,
                    payment_url: outcome.payment_url,
                    error: None,
                },
                Ok(outcome) => WeekSubmission {
                    week_start: week.week_start,
                    success: false,
                    order_id: None,
                    payment_url: None,
                    error: Some(
                        outcome
                            .error
                            .unwrap_or_else(|| "Submission rejected".to_string()),
                    ),
                },
                // Transient service failure: record and move on to the
                // next week.
                Err(e) => {
                    tracing::warn!(week_start = %request.week_start, error = %e, "Week submission failed");
                    WeekSubmission {
                        week_start: week.week_start,
                        success: false,
                        order_id: None,
                        payment_url: None,
                        error: Some(e.to_string()),
                    }
                }
            };

            if record.success && record.payment_url.is_some() {
                let payment_url = record.payment_url.clone().unwrap_or_default();
                let order_id = record.order_id.clone();
                let week_start = record.week_start;
                submissions.push(record);

                let remaining_weeks: Vec<NaiveDate> = weeks
                    .iter()
                    .skip(week_index + 1)
                    .map(|w| w.week_start)
                    .collect();
                tracing::info!(
                    %week_start,
                    remaining = remaining_weeks.len(),
                    "Redirecting to payment provider"
                );
                self.phase = PaymentPhase::Redirecting;
                return Ok(PaymentOutcome::Redirect {
                    payment_url,
                    order_id,
                    week_start,
                    submitted: submissions,
                    remaining_weeks,
                });
            }

            submissions.push(record);
        }

        if submissions.iter().any(|s| s.success) {
            self.phase = PaymentPhase::Idle;
            return Ok(PaymentOutcome::Completed { submissions });
        }

        let message = submissions
            .iter()
            .filter_map(|s| {
                s.error
                    .as_ref()
                    .map(|e| format!("week of {}: {}", s.week_start.format("%Y-%m-%d"), e))
            })
            .collect::<Vec<_>>()
            .join("; ");
        tracing::warn!(%message, "All week submissions failed");
        self.phase = PaymentPhase::Failed;
        Ok(PaymentOutcome::Failed {
            submissions,
            message,
        })
    }

    /// Duplicate-check every week against freshly read orders.
    async fn validate_weeks(&self, user_id: &str, weeks: &[WeekGroup]) -> CoreResult<()> {
        let mut all_conflicts = ConflictReport::default();

        for week in weeks {
            let existing = self
                .orders
                .query_orders(user_id, &week.week_start_iso())
                .await?;
            let report = check_week(&week.selections, &existing);
            if report.has_conflict() {
                tracing::warn!(
                    week_start = %week.week_start_iso(),
                    conflicts = report.conflicts.len(),
                    "Duplicate check found paid lines"
                );
                all_conflicts.conflicts.extend(report.conflicts);
            }
        }

        if all_conflicts.has_conflict() {
            return Err(CoreError::Conflict(all_conflicts.describe()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::models::{
        Beneficiary, ExistingOrder, MealCategory, MenuItemRef, OrderLineItem, OrderStatus,
        SubmitOrderRequest, SubmitOutcome,
    };
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Scripted reply for one week's submission.
    #[derive(Clone)]
    enum MockReply {
        Outcome(SubmitOutcome),
        TransportError(String),
    }

    #[derive(Clone, Default)]
    struct MockOrderService {
        /// Existing orders keyed by week_start
        existing: HashMap<String, Vec<ExistingOrder>>,
        /// Scripted submit replies keyed by week_start
        replies: HashMap<String, MockReply>,
        /// week_starts of every submit call, in order
        submitted: Arc<Mutex<Vec<String>>>,
        /// week_starts of every query call, in order
        queried: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl OrderService for MockOrderService {
        async fn submit_order(&self, request: &SubmitOrderRequest) -> CoreResult<SubmitOutcome> {
            self.submitted.lock().unwrap().push(request.week_start.clone());
            match self.replies.get(&request.week_start) {
                Some(MockReply::Outcome(outcome)) => Ok(outcome.clone()),
                Some(MockReply::TransportError(msg)) => Err(CoreError::service(msg.clone())),
                None => Ok(SubmitOutcome::failure("no scripted reply")),
            }
        }

        async fn query_orders(
            &self,
            _user_id: &str,
            week_start: &str,
        ) -> CoreResult<Vec<ExistingOrder>> {
            self.queried.lock().unwrap().push(week_start.to_string());
            Ok(self.existing.get(week_start).cloned().unwrap_or_default())
        }
    }

    fn child() -> Beneficiary {
        Beneficiary::Dependent {
            id: "child-1".to_string(),
            name: "Maria".to_string(),
            course: "3B".to_string(),
        }
    }

    fn lunch_selection(date: &str) -> Selection {
        let mut s = Selection::new(date, child());
        s.set_item(
            MealCategory::Lunch,
            Some(MenuItemRef::new("menu-1", "A1", "Lentils", 5000.0)),
        );
        s
    }

    fn paid_order(week_start: &str, date: &str) -> ExistingOrder {
        ExistingOrder {
            id: "ord-1".to_string(),
            status: OrderStatus::Paid,
            week_start: week_start.to_string(),
            items: vec![OrderLineItem {
                date: date.to_string(),
                beneficiary_key: "child-1".to_string(),
                beneficiary_name: "Maria".to_string(),
                category: MealCategory::Lunch,
                item_name: "Lentils".to_string(),
                price: 5000.0,
            }],
        }
    }

    fn redirect_reply(order_id: &str) -> MockReply {
        MockReply::Outcome(SubmitOutcome::success(
            order_id,
            Some("https://pay.example/checkout".to_string()),
        ))
    }

    // Two selections in consecutive weeks (Mondays 2024-03-04 and 2024-03-11)
    fn two_week_selections() -> Vec<Selection> {
        vec![lunch_selection("2024-03-04"), lunch_selection("2024-03-11")]
    }

    #[tokio::test]
    async fn test_stop_at_first_successful_redirect() {
        let mut service = MockOrderService::default();
        service
            .replies
            .insert("2024-03-04".to_string(), redirect_reply("ord-a"));
        service
            .replies
            .insert("2024-03-11".to_string(), redirect_reply("ord-b"));
        let submitted = service.submitted.clone();

        let mut orchestrator = PaymentOrchestrator::new(service);
        let outcome = orchestrator.pay("user-1", &two_week_selections()).await.unwrap();

        // Week B must never be submitted
        assert_eq!(*submitted.lock().unwrap(), vec!["2024-03-04".to_string()]);
        match outcome {
            PaymentOutcome::Redirect {
                payment_url,
                order_id,
                remaining_weeks,
                submitted,
                ..
            } => {
                assert_eq!(payment_url, "https://pay.example/checkout");
                assert_eq!(order_id.as_deref(), Some("ord-a"));
                assert_eq!(remaining_weeks.len(), 1);
                assert_eq!(remaining_weeks[0].format("%Y-%m-%d").to_string(), "2024-03-11");
                assert_eq!(submitted.len(), 1);
            }
            other => panic!("Expected Redirect, got {:?}", other),
        }
        assert_eq!(*orchestrator.phase(), PaymentPhase::Redirecting);
    }

    #[tokio::test]
    async fn test_conflict_in_one_week_blocks_all_weeks() {
        let mut service = MockOrderService::default();
        // Week A already paid; week B is clean
        service.existing.insert(
            "2024-03-04".to_string(),
            vec![paid_order("2024-03-04", "2024-03-04")],
        );
        service
            .replies
            .insert("2024-03-11".to_string(), redirect_reply("ord-b"));
        let submitted = service.submitted.clone();

        let mut orchestrator = PaymentOrchestrator::new(service);
        let err = orchestrator.pay("user-1", &two_week_selections()).await.unwrap_err();

        assert!(matches!(err, CoreError::Conflict(_)));
        assert!(err.to_string().contains("Maria"));
        // No submission at all, clean week included
        assert!(submitted.lock().unwrap().is_empty());
        assert_eq!(*orchestrator.phase(), PaymentPhase::Failed);
    }

    #[tokio::test]
    async fn test_failed_week_does_not_abort_siblings() {
        let mut service = MockOrderService::default();
        service.replies.insert(
            "2024-03-04".to_string(),
            MockReply::TransportError("connection reset".to_string()),
        );
        service
            .replies
            .insert("2024-03-11".to_string(), redirect_reply("ord-b"));
        let submitted = service.submitted.clone();

        let mut orchestrator = PaymentOrchestrator::new(service);
        let outcome = orchestrator.pay("user-1", &two_week_selections()).await.unwrap();

        assert_eq!(submitted.lock().unwrap().len(), 2);
        match outcome {
            PaymentOutcome::Redirect { submitted, .. } => {
                // Week A's failure is on record
                assert_eq!(submitted.len(), 2);
                assert!(!submitted[0].success);
                assert!(submitted[0].error.as_ref().unwrap().contains("connection reset"));
                assert!(submitted[1].success);
            }
            other => panic!("Expected Redirect, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_all_weeks_failing_aggregates_errors() {
        let mut service = MockOrderService::default();
        service.replies.insert(
            "2024-03-04".to_string(),
            MockReply::TransportError("connection reset".to_string()),
        );
        service.replies.insert(
            "2024-03-11".to_string(),
            MockReply::Outcome(SubmitOutcome::failure("provider unavailable")),
        );

        let mut orchestrator = PaymentOrchestrator::new(service);
        let outcome = orchestrator.pay("user-1", &two_week_selections()).await.unwrap();

        match outcome {
            PaymentOutcome::Failed { submissions, message } => {
                assert_eq!(submissions.len(), 2);
                assert!(message.contains("2024-03-04"));
                assert!(message.contains("connection reset"));
                assert!(message.contains("2024-03-11"));
                assert!(message.contains("provider unavailable"));
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
        assert_eq!(*orchestrator.phase(), PaymentPhase::Failed);
    }

    #[tokio::test]
    async fn test_empty_selection_set_rejected_before_any_call() {
        let service = MockOrderService::default();
        let submitted = service.submitted.clone();
        let queried = service.queried.clone();

        let mut orchestrator = PaymentOrchestrator::new(service);
        let err = orchestrator.pay("user-1", &[]).await.unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert!(submitted.lock().unwrap().is_empty());
        assert!(queried.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_date_aborts_attempt() {
        let service = MockOrderService::default();
        let mut orchestrator = PaymentOrchestrator::new(service);

        let err = orchestrator
            .pay("user-1", &[lunch_selection("garbage")])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::MalformedDate(_)));
    }

    #[tokio::test]
    async fn test_retry_revalidates_from_scratch() {
        let mut service = MockOrderService::default();
        service.replies.insert(
            "2024-03-04".to_string(),
            MockReply::TransportError("connection reset".to_string()),
        );
        let queried = service.queried.clone();

        let mut orchestrator = PaymentOrchestrator::new(service);
        let selections = vec![lunch_selection("2024-03-04")];

        let first = orchestrator.pay("user-1", &selections).await.unwrap();
        assert!(matches!(first, PaymentOutcome::Failed { .. }));

        // Retry: the duplicate check re-reads persisted orders, no caching
        let second = orchestrator.pay("user-1", &selections).await.unwrap();
        assert!(matches!(second, PaymentOutcome::Failed { .. }));
        assert_eq!(queried.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_success_without_payment_url_completes() {
        let mut service = MockOrderService::default();
        service.replies.insert(
            "2024-03-04".to_string(),
            MockReply::Outcome(SubmitOutcome::success("ord-a", None)),
        );
        service.replies.insert(
            "2024-03-11".to_string(),
            MockReply::Outcome(SubmitOutcome::success("ord-b", None)),
        );
        let submitted = service.submitted.clone();

        let mut orchestrator = PaymentOrchestrator::new(service);
        let outcome = orchestrator.pay("user-1", &two_week_selections()).await.unwrap();

        // Without a redirect URL every week is submitted
        assert_eq!(submitted.lock().unwrap().len(), 2);
        match outcome {
            PaymentOutcome::Completed { submissions } => {
                assert!(submissions.iter().all(|s| s.success));
            }
            other => panic!("Expected Completed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_weeks_submitted_in_chronological_order() {
        let mut service = MockOrderService::default();
        service.replies.insert(
            "2024-03-04".to_string(),
            MockReply::Outcome(SubmitOutcome::failure("nope")),
        );
        service.replies.insert(
            "2024-03-11".to_string(),
            MockReply::Outcome(SubmitOutcome::failure("nope")),
        );
        let submitted = service.submitted.clone();

        let mut orchestrator = PaymentOrchestrator::new(service);
        // Input deliberately out of order
        let selections = vec![lunch_selection("2024-03-11"), lunch_selection("2024-03-04")];
        let _ = orchestrator.pay("user-1", &selections).await.unwrap();

        assert_eq!(
            *submitted.lock().unwrap(),
            vec!["2024-03-04".to_string(), "2024-03-11".to_string()]
        );
    }
}
