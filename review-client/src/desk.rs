//! Review desk
//!
//! Drives one reviewer's screen: the open order, the cached lists and the
//! reference data. Only one order is open at a time and only one
//! transition may be in flight.

use crate::api::ReviewBackend;
use crate::{ClientError, ClientResult};
use review_core::workflow::{self, ReviewAction};
use review_core::{FinancialBreakdown, ListCache, ReviewSession, TransitionRequest};
use shared::{Company, Machine, ReviewList, ReviewStats, ReviewStatus, Vehicle};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Companies, machines and vehicles for the selection lists
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub companies: Vec<Company>,
    pub machines: Vec<Machine>,
    pub vehicles: Vec<Vehicle>,
}

impl ReferenceData {
    /// Machines of one company; machines without an owner are always offered
    pub fn machines_for_company(&self, company_id: i64) -> impl Iterator<Item = &Machine> {
        self.machines
            .iter()
            .filter(move |m| m.company_id.is_none_or(|owner| owner == company_id))
    }
}

/// Shared "transition in flight" flag
///
/// Clones observe the same flag, so UI code can disable its controls
/// while a request is pending.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn acquire(&self) -> ClientResult<InFlightGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::Busy)?;
        Ok(InFlightGuard(self.0.clone()))
    }
}

/// Clears the flag on drop, whether the request succeeded or not
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Result of a transition the backend accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub order_id: i64,
    pub status: ReviewStatus,
    /// The order left its list; callers should refresh lists and stats
    pub refresh_lists: bool,
}

impl From<&TransitionRequest> for TransitionOutcome {
    fn from(request: &TransitionRequest) -> Self {
        Self {
            order_id: request.order_id,
            status: request.to,
            refresh_lists: request.closes_session(),
        }
    }
}

pub struct ReviewDesk<B> {
    backend: B,
    session: Option<ReviewSession>,
    reference: Option<ReferenceData>,
    lists: ListCache,
    in_flight: InFlight,
    totals: watch::Sender<Option<FinancialBreakdown>>,
}

impl<B: ReviewBackend> ReviewDesk<B> {
    pub fn new(backend: B) -> Self {
        let (totals, _) = watch::channel(None);
        Self {
            backend,
            session: None,
            reference: None,
            lists: ListCache::new(),
            in_flight: InFlight::default(),
            totals,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> Option<&ReviewSession> {
        self.session.as_ref()
    }

    pub fn lists(&self) -> &ListCache {
        &self.lists
    }

    pub fn in_flight(&self) -> InFlight {
        self.in_flight.clone()
    }

    /// Reference data, empty until the first order is opened
    pub fn reference(&self) -> &ReferenceData {
        static EMPTY: ReferenceData = ReferenceData {
            companies: Vec::new(),
            machines: Vec::new(),
            vehicles: Vec::new(),
        };
        self.reference.as_ref().unwrap_or(&EMPTY)
    }

    /// Receive every breakdown change of the open order (`None` once closed)
    pub fn subscribe(&self) -> watch::Receiver<Option<FinancialBreakdown>> {
        self.totals.subscribe()
    }

    fn publish(&self) {
        let breakdown = self.session.as_ref().map(|s| s.breakdown().clone());
        self.totals.send_replace(breakdown);
    }

    // ========== Loading ==========

    /// Open an order for review
    ///
    /// Replaces the open order, discarding its unsaved edits. Reference
    /// data is fetched on the first open only.
    pub async fn open(&mut self, order_id: i64) -> ClientResult<&ReviewSession> {
        self.ensure_reference().await;

        let detail = self.backend.order_detail(order_id).await?;
        if let Some(previous) = &self.session
            && previous.order_id() != order_id
        {
            tracing::info!(
                previous = previous.order_id(),
                order_id,
                "Discarding unsaved edits of previously open order"
            );
        }

        let session = ReviewSession::open(detail);
        tracing::info!(order_id, status = %session.status(), "Order opened for review");
        self.session = Some(session);
        self.publish();
        self.session.as_ref().ok_or(ClientError::NoOpenOrder)
    }

    /// Close the open order without saving
    pub fn close(&mut self) -> Option<ReviewSession> {
        let closed = self.session.take();
        if closed.is_some() {
            self.publish();
        }
        closed
    }

    async fn ensure_reference(&mut self) {
        if self.reference.is_some() {
            return;
        }
        let (companies, machines, vehicles) = tokio::join!(
            self.backend.companies(),
            self.backend.machines(),
            self.backend.vehicles()
        );
        self.reference = Some(ReferenceData {
            companies: or_empty("companies", companies),
            machines: or_empty("machines", machines),
            vehicles: or_empty("vehicles", vehicles),
        });
    }

    pub async fn refresh_list(&mut self, list: ReviewList) -> ClientResult<&[shared::OrderSummary]> {
        let rows = self.backend.list(list).await?;
        self.lists.replace(list, rows);
        Ok(self.lists.rows(list))
    }

    /// Fetch all three lists
    ///
    /// Stops at the first failure; lists already fetched keep their new rows.
    pub async fn refresh_lists(&mut self) -> ClientResult<()> {
        for list in ReviewList::ALL {
            self.refresh_list(list).await?;
        }
        Ok(())
    }

    pub async fn refresh_stats(&mut self) -> ClientResult<ReviewStats> {
        let stats = self.backend.stats_summary().await?;
        self.lists.set_stats(stats);
        Ok(stats)
    }

    // ========== Editing ==========

    /// Run an edit against the open order and publish the new breakdown
    ///
    /// ```ignore
    /// desk.edit(|s| s.update_field(0, MaterialField::Quantity, "3"))??;
    /// ```
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut ReviewSession) -> R) -> ClientResult<R> {
        let session = self.session.as_mut().ok_or(ClientError::NoOpenOrder)?;
        let result = f(session);
        self.publish();
        Ok(result)
    }

    // ========== Workflow ==========

    pub async fn approve(&mut self) -> ClientResult<TransitionOutcome> {
        self.transition_open(ReviewAction::Approve).await
    }

    /// Save a draft; the order stays open
    pub async fn save(&mut self) -> ClientResult<TransitionOutcome> {
        self.transition_open(ReviewAction::Save).await
    }

    pub async fn standby(&mut self, reason: impl Into<String>) -> ClientResult<TransitionOutcome> {
        self.transition_open(ReviewAction::Standby {
            reason: reason.into(),
        })
        .await
    }

    pub async fn cancel(&mut self, reason: impl Into<String>) -> ClientResult<TransitionOutcome> {
        self.transition_open(ReviewAction::Cancel {
            reason: reason.into(),
        })
        .await
    }

    /// Move a standby order back to pending review
    pub async fn return_to_review(&mut self, order_id: i64) -> ClientResult<TransitionOutcome> {
        self.transition_row(order_id, ReviewStatus::Standby, ReviewAction::ReturnToReview)
            .await
    }

    /// Move a cancelled order back to pending review
    pub async fn restore(&mut self, order_id: i64) -> ClientResult<TransitionOutcome> {
        self.transition_row(order_id, ReviewStatus::Cancelled, ReviewAction::Restore)
            .await
    }

    async fn transition_open(&mut self, action: ReviewAction) -> ClientResult<TransitionOutcome> {
        let _guard = self.in_flight.acquire()?;
        let session = self.session.as_ref().ok_or(ClientError::NoOpenOrder)?;
        let request = workflow::plan(session, action).inspect_err(|e| {
            tracing::debug!(order_id = session.order_id(), error = %e, "Transition rejected locally");
        })?;

        self.send(&request).await?;

        if request.closes_session() {
            self.session = None;
            self.lists.remove(request.order_id);
            self.publish();
        } else if let Some(session) = self.session.as_mut() {
            workflow::apply(session, &request);
        }
        Ok(TransitionOutcome::from(&request))
    }

    async fn transition_row(
        &mut self,
        order_id: i64,
        expected: ReviewStatus,
        action: ReviewAction,
    ) -> ClientResult<TransitionOutcome> {
        let _guard = self.in_flight.acquire()?;
        let status = self
            .lists
            .find(order_id)
            .map(|(list, _)| list.status())
            .unwrap_or(expected);
        let request = workflow::plan_for_row(order_id, status, action)?;

        self.send(&request).await?;

        self.lists.remove(order_id);
        Ok(TransitionOutcome::from(&request))
    }

    async fn send(&self, request: &TransitionRequest) -> ClientResult<()> {
        self.backend.execute(request).await.inspect_err(|e| {
            tracing::warn!(
                order_id = request.order_id,
                action = request.action.name(),
                error = %e,
                "Transition failed"
            );
        })
    }
}

fn or_empty<T>(kind: &'static str, fetched: ClientResult<Vec<T>>) -> Vec<T> {
    match fetched {
        Ok(items) => {
            tracing::debug!(kind, count = items.len(), "Reference data loaded");
            items
        }
        Err(e) => {
            tracing::warn!(kind, error = %e, "Reference data unavailable, using empty list");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_guard() {
        let flag = InFlight::default();
        let observer = flag.clone();

        let guard = flag.acquire().unwrap();
        assert!(observer.is_set());
        assert!(matches!(flag.acquire(), Err(ClientError::Busy)));

        drop(guard);
        assert!(!observer.is_set());
        assert!(flag.acquire().is_ok());
    }

    #[test]
    fn test_machines_for_company() {
        let machine = |id, company_id| Machine {
            id,
            name: format!("M{id}"),
            company_id,
        };
        let reference = ReferenceData {
            machines: vec![machine(1, Some(10)), machine(2, Some(20)), machine(3, None)],
            ..Default::default()
        };
        let ids: Vec<i64> = reference.machines_for_company(10).map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
