//! Review Workflow state machine
//!
//! ```text
//!                 save
//!                ┌────┐
//!                ▼    │
//!   ┌──────── pending_review ────────┐
//!   │ approve    │  ▲      ▲         │ cancel
//!   ▼    standby │  │      │ restore ▼
//! approved       ▼  │      └──── cancelled
//!             standby
//!          (return-to-review)
//! ```
//!
//! Planning is pure: `plan` checks the transition, runs validation
//! where required and builds the request. Sending it is the client's job.

use crate::error::{ReviewError, ReviewResult};
use crate::session::ReviewSession;
use shared::{ReasonRequest, ReviewPayload, ReviewStatus};

/// A user-initiated workflow action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    /// Persist a draft without changing status
    Save,
    Standby { reason: String },
    Cancel { reason: String },
    ReturnToReview,
    Restore,
}

impl ReviewAction {
    /// Verb used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Save => "save",
            ReviewAction::Standby { .. } => "put on standby",
            ReviewAction::Cancel { .. } => "cancel",
            ReviewAction::ReturnToReview => "return to review",
            ReviewAction::Restore => "restore",
        }
    }

    /// Endpoint segment after `/review/{id}/`
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Save => "save",
            ReviewAction::Standby { .. } => "standby",
            ReviewAction::Cancel { .. } => "archive",
            ReviewAction::ReturnToReview => "return-to-review",
            ReviewAction::Restore => "restore-from-archived",
        }
    }

    /// Approve and save need the full ledger of an open session
    pub fn needs_session(&self) -> bool {
        matches!(self, ReviewAction::Approve | ReviewAction::Save)
    }
}

/// Status reached by applying `action` in status `from`
pub fn next_status(from: ReviewStatus, action: &ReviewAction) -> ReviewResult<ReviewStatus> {
    use ReviewStatus::*;

    match (from, action) {
        (PendingReview, ReviewAction::Approve) => Ok(Approved),
        (PendingReview, ReviewAction::Save) => Ok(PendingReview),
        (PendingReview, ReviewAction::Standby { .. }) => Ok(Standby),
        (PendingReview, ReviewAction::Cancel { .. }) => Ok(Cancelled),
        (Standby, ReviewAction::ReturnToReview) => Ok(PendingReview),
        (Cancelled, ReviewAction::Restore) => Ok(PendingReview),
        _ => Err(ReviewError::InvalidTransition {
            from,
            action: action.name(),
        }),
    }
}

/// Request body of a transition
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionBody {
    Review(ReviewPayload),
    Reason(ReasonRequest),
    Empty,
}

/// A checked transition, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub order_id: i64,
    pub action: ReviewAction,
    pub from: ReviewStatus,
    pub to: ReviewStatus,
    pub body: TransitionBody,
}

impl TransitionRequest {
    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        format!("review/{}/{}", self.order_id, self.action.endpoint())
    }

    /// Whether success moves the order out of the pending set
    pub fn closes_session(&self) -> bool {
        self.to != ReviewStatus::PendingReview || self.from != ReviewStatus::PendingReview
    }
}

fn required_reason(reason: &str, action: &ReviewAction) -> ReviewResult<ReasonRequest> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(ReviewError::MissingReason(action.name()));
    }
    Ok(ReasonRequest {
        reason: trimmed.to_string(),
    })
}

fn reason_or_empty_body(action: &ReviewAction) -> ReviewResult<TransitionBody> {
    match action {
        ReviewAction::Standby { reason } | ReviewAction::Cancel { reason } => {
            Ok(TransitionBody::Reason(required_reason(reason, action)?))
        }
        _ => Ok(TransitionBody::Empty),
    }
}

/// Plan a transition for the open order
///
/// Approve is blocked by any validation violation. Save only needs the
/// payload; standby and cancel need a non-blank reason.
pub fn plan(session: &ReviewSession, action: ReviewAction) -> ReviewResult<TransitionRequest> {
    let from = session.status();
    let to = next_status(from, &action)?;

    let body = match &action {
        ReviewAction::Approve => {
            let violations = session.validate();
            if !violations.is_empty() {
                return Err(ReviewError::Validation(violations));
            }
            TransitionBody::Review(session.payload(false))
        }
        ReviewAction::Save => TransitionBody::Review(session.payload(true)),
        other => reason_or_empty_body(other)?,
    };

    tracing::debug!(order_id = session.order_id(), action = action.name(), %from, %to, "Planned transition");

    Ok(TransitionRequest {
        order_id: session.order_id(),
        action,
        from,
        to,
        body,
    })
}

/// Plan a transition for a list row (no open session)
pub fn plan_for_row(
    order_id: i64,
    status: ReviewStatus,
    action: ReviewAction,
) -> ReviewResult<TransitionRequest> {
    if action.needs_session() {
        return Err(ReviewError::NoOpenOrder);
    }
    let to = next_status(status, &action)?;
    let body = reason_or_empty_body(&action)?;

    Ok(TransitionRequest {
        order_id,
        action,
        from: status,
        to,
        body,
    })
}

/// Record a transition the backend accepted
pub fn apply(session: &mut ReviewSession, request: &TransitionRequest) {
    if session.order_id() == request.order_id {
        session.set_status(request.to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{MaterialField, WorklogField};
    use rust_decimal::Decimal;
    use shared::{Material, OrderDetail, ServiceOrder, Worklog};

    fn session(status: ReviewStatus) -> ReviewSession {
        ReviewSession::open(OrderDetail {
            order: ServiceOrder {
                id: 5,
                company_id: Some(1),
                machine_id: Some(2),
                status,
                ..Default::default()
            },
            worklogs: vec![Worklog::default()],
            materials: vec![Material::default()],
            ..Default::default()
        })
    }

    #[test]
    fn test_transition_table() {
        use ReviewStatus::*;
        let standby = ReviewAction::Standby {
            reason: "aguardando peça".to_string(),
        };
        let cancel = ReviewAction::Cancel {
            reason: "duplicada".to_string(),
        };

        assert_eq!(next_status(PendingReview, &ReviewAction::Approve), Ok(Approved));
        assert_eq!(next_status(PendingReview, &ReviewAction::Save), Ok(PendingReview));
        assert_eq!(next_status(PendingReview, &standby), Ok(Standby));
        assert_eq!(next_status(PendingReview, &cancel), Ok(Cancelled));
        assert_eq!(next_status(Standby, &ReviewAction::ReturnToReview), Ok(PendingReview));
        assert_eq!(next_status(Cancelled, &ReviewAction::Restore), Ok(PendingReview));

        for (from, action) in [
            (Approved, ReviewAction::Restore),
            (Approved, ReviewAction::Approve),
            (Standby, ReviewAction::Approve),
            (Standby, ReviewAction::Restore),
            (Cancelled, ReviewAction::ReturnToReview),
            (PendingReview, ReviewAction::Restore),
        ] {
            assert!(matches!(
                next_status(from, &action),
                Err(ReviewError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_approve_builds_payload() {
        let s = session(ReviewStatus::PendingReview);
        let request = plan(&s, ReviewAction::Approve).unwrap();
        assert_eq!(request.path(), "review/5/approve");
        assert_eq!(request.to, ReviewStatus::Approved);
        assert!(request.closes_session());
        match request.body {
            TransitionBody::Review(payload) => {
                assert_eq!(payload.company_id, Some(1));
                assert_eq!(payload.observations, None);
                assert_eq!(payload.grand_total, s.breakdown().grand_total);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_scenario_c_inverted_period_blocks_approve_not_save() {
        let mut s = session(ReviewStatus::PendingReview);
        s.update_field(0, WorklogField::Start, "2025-03-10T12:00").unwrap();
        s.update_field(0, WorklogField::End, "2025-03-10T10:00").unwrap();

        let err = plan(&s, ReviewAction::Approve).unwrap_err();
        match err {
            ReviewError::Validation(violations) => {
                assert_eq!(violations.len(), 1);
                assert!(violations[0].to_string().starts_with("period 1"));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let save = plan(&s, ReviewAction::Save).unwrap();
        assert_eq!(save.path(), "review/5/save");
        assert_eq!(save.to, ReviewStatus::PendingReview);
        assert!(!save.closes_session());
        assert!(matches!(save.body, TransitionBody::Review(ref p) if p.observations.is_some()));
    }

    #[test]
    fn test_scenario_d_negative_material_blocks_approve() {
        let mut s = session(ReviewStatus::PendingReview);
        s.update_field(0, MaterialField::Name, "Correia").unwrap();
        s.update_field(0, MaterialField::Quantity, "-1").unwrap();
        s.update_field(0, MaterialField::UnitPrice, "10").unwrap();

        assert_eq!(s.ledger().materials()[0].line_total(), Decimal::from(-10));
        let err = plan(&s, ReviewAction::Approve).unwrap_err();
        assert!(err.to_string().contains("Correia"));
    }

    #[test]
    fn test_standby_and_cancel_need_reason() {
        let s = session(ReviewStatus::PendingReview);
        let err = plan(
            &s,
            ReviewAction::Standby {
                reason: "   ".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, ReviewError::MissingReason("put on standby"));

        let err = plan(&s, ReviewAction::Cancel { reason: String::new() }).unwrap_err();
        assert_eq!(err, ReviewError::MissingReason("cancel"));

        let request = plan(
            &s,
            ReviewAction::Cancel {
                reason: "  cliente desistiu ".to_string(),
            },
        )
        .unwrap();
        assert_eq!(request.path(), "review/5/archive");
        assert_eq!(
            request.body,
            TransitionBody::Reason(ReasonRequest {
                reason: "cliente desistiu".to_string()
            })
        );
    }

    #[test]
    fn test_standby_skips_financial_validation() {
        let mut s = session(ReviewStatus::PendingReview);
        s.set_company(None);
        s.update_field(0, MaterialField::Quantity, "-4").unwrap();
        let request = plan(
            &s,
            ReviewAction::Standby {
                reason: "falta peça".to_string(),
            },
        )
        .unwrap();
        assert_eq!(request.to, ReviewStatus::Standby);
    }

    #[test]
    fn test_plan_for_row() {
        let request =
            plan_for_row(8, ReviewStatus::Standby, ReviewAction::ReturnToReview).unwrap();
        assert_eq!(request.path(), "review/8/return-to-review");
        assert_eq!(request.body, TransitionBody::Empty);
        assert!(request.closes_session());

        let request = plan_for_row(8, ReviewStatus::Cancelled, ReviewAction::Restore).unwrap();
        assert_eq!(request.path(), "review/8/restore-from-archived");

        assert_eq!(
            plan_for_row(8, ReviewStatus::PendingReview, ReviewAction::Approve),
            Err(ReviewError::NoOpenOrder)
        );
        assert!(plan_for_row(8, ReviewStatus::PendingReview, ReviewAction::Restore).is_err());
    }

    #[test]
    fn test_apply_records_status() {
        let mut s = session(ReviewStatus::PendingReview);
        let request = plan(
            &s,
            ReviewAction::Standby {
                reason: "x".to_string(),
            },
        )
        .unwrap();
        apply(&mut s, &request);
        assert_eq!(s.status(), ReviewStatus::Standby);
        assert!(plan(&s, ReviewAction::Approve).is_err());
    }
}
