//! The order currently open for review
//!
//! A `ReviewSession` owns the transient order copy, its ledger, the
//! custom-rate override and the latest breakdown. Every mutation goes
//! through the session and recomputes before returning, so
//! [`ReviewSession::breakdown`] is never stale.

use crate::error::{ReviewError, ReviewResult};
use crate::ledger::{Ledger, LedgerField, LedgerItem};
use crate::money::MAX_PRICE;
use crate::pricing::{ClientType, PricingTier, rate_for_distance};
use crate::totals::{FinancialBreakdown, recompute};
use crate::validation::{Violation, validate};
use rust_decimal::Decimal;
use shared::{OrderDetail, ReviewPayload, ReviewStatus, ServiceOrder};

#[derive(Debug, Clone)]
pub struct ReviewSession {
    order: ServiceOrder,
    ledger: Ledger,
    custom_rate: Option<Decimal>,
    breakdown: FinancialBreakdown,
}

impl ReviewSession {
    /// Open an order for editing.
    ///
    /// A stored `effective_hourly_rate` that differs from the resolved
    /// tier rate is restored as the custom-rate override. Stored rates
    /// above [`MAX_PRICE`] are ignored.
    pub fn open(detail: OrderDetail) -> Self {
        let ledger = Ledger::from_detail(&detail);
        let stored_rate = detail.order.effective_hourly_rate;
        let mut session = Self {
            order: detail.order,
            ledger,
            custom_rate: None,
            breakdown: FinancialBreakdown::default(),
        };
        session.recompute();

        if let Some(rate) = stored_rate
            && rate > Decimal::ZERO
            && rate <= MAX_PRICE
            && rate != session.breakdown.hourly_rate
        {
            session.custom_rate = Some(rate);
            session.recompute();
        }

        tracing::info!(
            order_id = session.order.id,
            order_number = %session.order.order_number,
            materials = session.ledger.materials().len(),
            worklogs = session.ledger.worklogs().len(),
            displacements = session.ledger.displacements().len(),
            custom_rate = session.custom_rate.is_some(),
            "Opened order for review"
        );
        session
    }

    pub fn order(&self) -> &ServiceOrder {
        &self.order
    }

    pub fn order_id(&self) -> i64 {
        self.order.id
    }

    pub fn status(&self) -> ReviewStatus {
        self.order.status
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn client_type(&self) -> ClientType {
        ClientType::from_is_new(self.order.is_new_client)
    }

    pub fn custom_hourly_rate(&self) -> Option<Decimal> {
        self.custom_rate
    }

    /// Breakdown as of the last mutation
    pub fn breakdown(&self) -> &FinancialBreakdown {
        &self.breakdown
    }

    /// Tier resolved for the current distance and client type
    pub fn current_tier(&self) -> &'static PricingTier {
        rate_for_distance(self.breakdown.total_km, self.client_type())
    }

    pub fn recompute(&mut self) -> &FinancialBreakdown {
        self.breakdown = recompute(&self.order, &mut self.ledger, self.custom_rate);
        &self.breakdown
    }

    // ========== Ledger ==========

    /// Append a default item of kind `T`, returning its index
    pub fn add<T: LedgerItem>(&mut self) -> usize {
        let index = self.ledger.add::<T>();
        tracing::debug!(order_id = self.order.id, kind = T::KIND, index, "Added line item");
        self.recompute();
        index
    }

    pub fn remove_at<T: LedgerItem>(&mut self, index: usize) -> ReviewResult<T> {
        let removed = self.ledger.remove_at::<T>(index)?;
        tracing::debug!(order_id = self.order.id, kind = T::KIND, index, "Removed line item");
        self.recompute();
        Ok(removed)
    }

    pub fn update_field<F: LedgerField>(&mut self, index: usize, field: F, raw: &str) -> ReviewResult<()> {
        self.ledger.update_field(index, field, raw)?;
        self.recompute();
        Ok(())
    }

    // ========== Rate and client type ==========

    /// Set a manual hourly rate.
    ///
    /// A value equal to the currently resolved tier rate clears the
    /// override instead of storing it.
    pub fn set_custom_hourly_rate(&mut self, value: Decimal) -> ReviewResult<&FinancialBreakdown> {
        if value < Decimal::ZERO {
            return Err(ReviewError::NegativeRate(value));
        }
        if value > MAX_PRICE {
            return Err(ReviewError::RateTooHigh { value, max: MAX_PRICE });
        }

        let tier_rate = self.current_tier().rate;
        if value == tier_rate {
            tracing::debug!(order_id = self.order.id, %value, "Custom rate equals tier rate, clearing override");
            self.custom_rate = None;
        } else {
            tracing::debug!(order_id = self.order.id, %value, %tier_rate, "Custom hourly rate set");
            self.custom_rate = Some(value);
        }
        Ok(self.recompute())
    }

    /// Drop any override and go back to tier pricing
    pub fn reset_hourly_rate(&mut self) -> &FinancialBreakdown {
        self.custom_rate = None;
        self.recompute()
    }

    /// Flip new/existing client; any override is discarded
    pub fn toggle_client_type(&mut self) -> &FinancialBreakdown {
        self.order.is_new_client = !self.order.is_new_client;
        self.custom_rate = None;
        tracing::debug!(
            order_id = self.order.id,
            is_new_client = self.order.is_new_client,
            "Toggled client type"
        );
        self.recompute()
    }

    // ========== Form fields ==========

    pub fn set_company(&mut self, company_id: Option<i64>) {
        self.order.company_id = company_id;
    }

    pub fn set_machine(&mut self, machine_id: Option<i64>) {
        self.order.machine_id = machine_id;
    }

    pub fn set_maintenance_type(&mut self, value: impl Into<String>) {
        self.order.maintenance_type = value.into();
    }

    pub fn set_service_description(&mut self, value: impl Into<String>) {
        self.order.service_description = value.into();
    }

    pub fn set_observations(&mut self, value: impl Into<String>) {
        self.order.observations = value.into();
    }

    // ========== Submission ==========

    /// Pre-approval checks
    pub fn validate(&self) -> Vec<Violation> {
        validate(&self.order, &self.ledger, self.custom_rate)
    }

    /// Serialize ledger and breakdown for approve/save
    pub fn payload(&self, include_observations: bool) -> ReviewPayload {
        let b = &self.breakdown;
        ReviewPayload {
            company_id: self.order.company_id,
            machine_id: self.order.machine_id,
            maintenance_type: self.order.maintenance_type.clone(),
            service_description: self.order.service_description.clone(),
            is_new_client: self.order.is_new_client,
            effective_hourly_rate: b.hourly_rate,
            value_service: b.total_additional_services,
            total_service_cost: b.total_service_cost(),
            total_material_cost: b.total_materials,
            grand_total: b.grand_total,
            total_hours: b.billable_hours,
            materials: self.ledger.materials().to_vec(),
            worklogs: self.ledger.worklogs().to_vec(),
            displacements: self.ledger.displacements().to_vec(),
            additional_services: self.ledger.additional_services().to_vec(),
            observations: include_observations.then(|| self.order.observations.clone()),
        }
    }

    /// Record a status change confirmed by the backend
    pub(crate) fn set_status(&mut self, status: ReviewStatus) {
        self.order.status = status;
    }
}
