//! Pre-approval validation
//!
//! Only the approve transition is gated by these checks. All violations
//! are collected so the user sees every problem at once.

use crate::ledger::Ledger;
use rust_decimal::Decimal;
use shared::{KmOption, ServiceOrder};
use thiserror::Error;

/// A single reason approval is blocked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("a company must be selected")]
    MissingCompany,

    #[error("a machine must be selected")]
    MissingMachine,

    /// `period` is 1-based, as shown to the user
    #[error("period {period}: end must be after start")]
    InvalidPeriod { period: usize },

    #[error("material '{name}' has a negative quantity or unit price")]
    NegativeMaterial { name: String },

    /// `index` is 1-based
    #[error("displacement {index}: km total cannot be negative")]
    NegativeDisplacementKm { index: usize },

    #[error("custom hourly rate must be greater than zero")]
    NonPositiveCustomRate,
}

fn is_positive_id(id: Option<i64>) -> bool {
    id.is_some_and(|id| id > 0)
}

/// Check the order, ledger and rate override before approval.
///
/// Returns an empty list when approval may proceed.
pub fn validate(order: &ServiceOrder, ledger: &Ledger, custom_rate: Option<Decimal>) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !is_positive_id(order.company_id) {
        violations.push(Violation::MissingCompany);
    }
    if !is_positive_id(order.machine_id) {
        violations.push(Violation::MissingMachine);
    }

    for (i, worklog) in ledger.worklogs().iter().enumerate() {
        if let Some((start, end)) = worklog.period()
            && end <= start
        {
            violations.push(Violation::InvalidPeriod { period: i + 1 });
        }
    }

    for material in ledger.materials() {
        if material.quantity < Decimal::ZERO || material.unit_price < Decimal::ZERO {
            violations.push(Violation::NegativeMaterial {
                name: material.name.clone(),
            });
        }
    }

    for (i, displacement) in ledger.displacements().iter().enumerate() {
        if displacement.km_option == KmOption::Above100 && displacement.km_total < Decimal::ZERO {
            violations.push(Violation::NegativeDisplacementKm { index: i + 1 });
        }
    }

    if let Some(rate) = custom_rate
        && rate <= Decimal::ZERO
    {
        violations.push(Violation::NonPositiveCustomRate);
    }

    if !violations.is_empty() {
        tracing::info!(
            order_id = order.id,
            count = violations.len(),
            "Approval blocked by validation"
        );
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::util::parse_datetime;
    use shared::{Displacement, Material, Worklog};

    fn valid_order() -> ServiceOrder {
        ServiceOrder {
            id: 9,
            company_id: Some(3),
            machine_id: Some(11),
            ..Default::default()
        }
    }

    fn period(start: &str, end: &str) -> Worklog {
        Worklog {
            start_datetime: parse_datetime(start),
            end_datetime: parse_datetime(end),
            hours: None,
        }
    }

    #[test]
    fn test_valid_order_has_no_violations() {
        let ledger = Ledger::new(
            vec![Material {
                name: "Óleo".to_string(),
                quantity: Decimal::ZERO,
                unit_price: Decimal::from(45),
            }],
            vec![period("2025-03-10T09:00", "2025-03-10T10:00")],
            vec![],
            vec![],
        );
        assert!(validate(&valid_order(), &ledger, None).is_empty());
        assert!(validate(&valid_order(), &ledger, Some(Decimal::from(100))).is_empty());
    }

    #[test]
    fn test_missing_selection() {
        let mut order = valid_order();
        order.company_id = None;
        order.machine_id = Some(0);
        let violations = validate(&order, &Ledger::default(), None);
        assert_eq!(violations, vec![Violation::MissingCompany, Violation::MissingMachine]);
    }

    #[test]
    fn test_inverted_period_names_index() {
        let ledger = Ledger::new(
            vec![],
            vec![
                period("2025-03-10T09:00", "2025-03-10T10:00"),
                period("2025-03-10T11:00", "2025-03-10T11:00"),
                period("2025-03-10T15:00", "2025-03-10T14:00"),
                period("2025-03-10T15:00", ""),
            ],
            vec![],
            vec![],
        );
        let violations = validate(&valid_order(), &ledger, None);
        assert_eq!(
            violations,
            vec![
                Violation::InvalidPeriod { period: 2 },
                Violation::InvalidPeriod { period: 3 },
            ]
        );
        assert_eq!(violations[0].to_string(), "period 2: end must be after start");
    }

    #[test]
    fn test_negative_material_names_material() {
        let ledger = Ledger::new(
            vec![Material {
                name: "Parafuso".to_string(),
                quantity: Decimal::from(-1),
                unit_price: Decimal::from(10),
            }],
            vec![],
            vec![],
            vec![],
        );
        let violations = validate(&valid_order(), &ledger, None);
        assert_eq!(
            violations,
            vec![Violation::NegativeMaterial {
                name: "Parafuso".to_string()
            }]
        );
        assert!(violations[0].to_string().contains("Parafuso"));
    }

    #[test]
    fn test_negative_km_total_rejected() {
        let ledger = Ledger::new(
            vec![],
            vec![],
            vec![
                Displacement {
                    km_option: KmOption::UpTo50,
                    km_total: Decimal::from(-5),
                    vehicle_id: None,
                },
                Displacement {
                    km_option: KmOption::Above100,
                    km_total: Decimal::from(-5),
                    vehicle_id: None,
                },
            ],
            vec![],
        );
        let violations = validate(&valid_order(), &ledger, None);
        assert_eq!(violations, vec![Violation::NegativeDisplacementKm { index: 2 }]);
    }

    #[test]
    fn test_custom_rate_must_be_positive() {
        let violations = validate(&valid_order(), &Ledger::default(), Some(Decimal::ZERO));
        assert_eq!(violations, vec![Violation::NonPositiveCustomRate]);
    }

    #[test]
    fn test_all_violations_reported_together() {
        let order = ServiceOrder::default();
        let ledger = Ledger::new(
            vec![Material {
                name: "A".to_string(),
                quantity: Decimal::ONE,
                unit_price: Decimal::from(-2),
            }],
            vec![period("2025-03-10T10:00", "2025-03-10T09:00")],
            vec![],
            vec![],
        );
        let violations = validate(&order, &ledger, Some(Decimal::ZERO));
        assert_eq!(violations.len(), 5);
    }
}
