//! Totals Engine
//!
//! Aggregates the ledger and the pricing tables into a
//! [`FinancialBreakdown`]. Pure apart from one observable side effect:
//! worklog hours derived from timestamps are written back to the ledger.
//!
//! Calculation order:
//! 1. materials = Σ quantity × unit_price
//! 2. displacement km and cost per displacement
//! 3. actual hours from worklogs
//! 4. tier lookup by total km and client type
//! 5. billable hours (minimum-hours floor unless a custom rate is set)
//! 6. hourly rate = custom rate or tier rate
//! 7. hours cost
//! 8. additional services
//! 9. grand total

use crate::ledger::Ledger;
use crate::money::{hours_between, round_money, round_up_to_half_hour, seconds_between, seconds_to_hours};
use crate::pricing::{ClientType, displacement_cost, rate_for_distance, total_displacement_km};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{AdditionalService, Displacement, Material, ServiceOrder, Worklog};

/// Derived financial state of the order under review
///
/// Not persisted until save/approve.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct FinancialBreakdown {
    pub total_materials: Decimal,
    pub total_displacement: Decimal,
    pub total_km: Decimal,
    pub actual_hours: Decimal,
    pub billable_hours: Decimal,
    pub hourly_rate: Decimal,
    pub hours_cost: Decimal,
    pub total_additional_services: Decimal,
    pub grand_total: Decimal,

    // === Presentation hints ===
    /// Range label of the resolved tier ("0–50 km")
    pub tier_label: &'static str,
    /// Minimum hours of the resolved tier
    pub min_hours: Decimal,
    /// The minimum-hours floor raised the billable hours
    pub min_hours_applied: bool,
    pub has_custom_rate: bool,
}

impl FinancialBreakdown {
    /// Labour plus displacement, sent as `total_service_cost`
    pub fn total_service_cost(&self) -> Decimal {
        self.hours_cost + self.total_displacement
    }
}

/// Σ quantity × unit_price
pub fn total_materials(materials: &[Material]) -> Decimal {
    materials.iter().map(Material::line_total).sum()
}

/// Σ displacement cost for the client type
pub fn total_displacement_cost(displacements: &[Displacement], client_type: ClientType) -> Decimal {
    displacements
        .iter()
        .map(|d| displacement_cost(d, client_type))
        .sum()
}

/// Σ additional service values
pub fn total_additional_services(services: &[AdditionalService]) -> Decimal {
    services.iter().map(|s| s.value).sum()
}

/// Manually entered hours of an untimed worklog, negatives count as zero
fn manual_hours(worklog: &Worklog) -> Decimal {
    worklog
        .hours
        .filter(|h| *h > Decimal::ZERO)
        .unwrap_or(Decimal::ZERO)
}

/// Sum worklog hours, writing timestamp-derived hours back onto each entry
///
/// Timestamps win over the stored value. Timed periods are summed in
/// whole seconds and rounded once at the end; only the per-entry
/// write-back is rounded individually.
fn accumulate_hours<'a>(worklogs: impl Iterator<Item = &'a mut Worklog>) -> Decimal {
    let mut seconds = 0i64;
    let mut manual = Decimal::ZERO;
    for worklog in worklogs {
        match worklog.period() {
            Some((start, end)) => {
                seconds = seconds.saturating_add(seconds_between(start, end));
                worklog.hours = Some(hours_between(start, end));
            }
            None => manual += manual_hours(worklog),
        }
    }
    round_money(seconds_to_hours(seconds) + manual)
}

/// Recompute the full breakdown for an order
///
/// `custom_rate` replaces the tier rate and disables the minimum-hours
/// floor. Calling this twice without a mutation in between yields the
/// same breakdown.
pub fn recompute(
    order: &ServiceOrder,
    ledger: &mut Ledger,
    custom_rate: Option<Decimal>,
) -> FinancialBreakdown {
    let client_type = ClientType::from_is_new(order.is_new_client);

    let total_materials = round_money(total_materials(ledger.materials()));

    let total_km = total_displacement_km(ledger.displacements());
    let total_displacement = total_displacement_cost(ledger.displacements(), client_type);

    let actual_hours = accumulate_hours(ledger.worklogs_mut().iter_mut());

    let tier = rate_for_distance(total_km, client_type);

    let (billable_hours, min_hours_applied) = match custom_rate {
        Some(_) => (actual_hours, false),
        None => {
            let floored = actual_hours.max(tier.min_hours);
            (round_up_to_half_hour(floored), actual_hours < tier.min_hours)
        }
    };

    let hourly_rate = custom_rate.unwrap_or(tier.rate);
    let hours_cost = round_money(billable_hours * hourly_rate);
    let total_additional_services = round_money(total_additional_services(ledger.additional_services()));
    let grand_total = hours_cost + total_displacement + total_materials + total_additional_services;

    tracing::debug!(
        order_id = order.id,
        client_type = %client_type,
        %total_km,
        %actual_hours,
        %billable_hours,
        %hourly_rate,
        %grand_total,
        "Recomputed review totals"
    );

    FinancialBreakdown {
        total_materials,
        total_displacement,
        total_km,
        actual_hours,
        billable_hours,
        hourly_rate,
        hours_cost,
        total_additional_services,
        grand_total,
        tier_label: tier.label,
        min_hours: tier.min_hours,
        min_hours_applied,
        has_custom_rate: custom_rate.is_some(),
    }
}
