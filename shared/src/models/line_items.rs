//! Editable line items of an order under review

use super::KmOption;
use crate::util::{lenient_datetime, lenient_decimal};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Material consumed by the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Material {
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "lenient_decimal")]
    pub quantity: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub unit_price: Decimal,
}

impl Material {
    /// `quantity × unit_price`, unclamped
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// A worked period
///
/// When both timestamps are set, `hours` is derived from them on every
/// recompute; otherwise the stored value is used as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Worklog {
    #[serde(default, with = "lenient_datetime")]
    pub start_datetime: Option<NaiveDateTime>,
    #[serde(default, with = "lenient_datetime")]
    pub end_datetime: Option<NaiveDateTime>,
    #[serde(
        default,
        serialize_with = "lenient_decimal::serialize_option",
        deserialize_with = "lenient_decimal::deserialize_option"
    )]
    pub hours: Option<Decimal>,
}

impl Worklog {
    /// Both timestamps, when both are present
    pub fn period(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start_datetime?, self.end_datetime?))
    }
}

/// Travel associated with the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Displacement {
    #[serde(default)]
    pub km_option: KmOption,
    #[serde(default, with = "lenient_decimal")]
    pub km_total: Decimal,
    #[serde(default)]
    pub vehicle_id: Option<i64>,
}

/// Extra billable service not covered by hours or materials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AdditionalService {
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "lenient_decimal")]
    pub value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_line_total_unclamped() {
        let m = Material {
            name: "Filtro".to_string(),
            quantity: Decimal::from(-1),
            unit_price: Decimal::from(10),
        };
        assert_eq!(m.line_total(), Decimal::from(-10));
    }

    #[test]
    fn test_worklog_from_backend_json() {
        let w: Worklog = serde_json::from_str(
            r#"{"start_datetime": "2025-03-10T09:00", "end_datetime": "2025-03-10 11:30:00", "hours": "2.5"}"#,
        )
        .unwrap();
        assert!(w.period().is_some());
        assert_eq!(w.hours, Some(Decimal::new(25, 1)));

        let w: Worklog = serde_json::from_str(r#"{"start_datetime": "", "hours": 3}"#).unwrap();
        assert!(w.period().is_none());
        assert_eq!(w.hours, Some(Decimal::from(3)));
    }

    #[test]
    fn test_displacement_from_loose_json() {
        let d: Displacement = serde_json::from_str(
            r#"{"km_option": "acima de 100km", "km_total": "120", "vehicle_id": 4}"#,
        )
        .unwrap();
        assert_eq!(d.km_option, KmOption::Above100);
        assert_eq!(d.km_total, Decimal::from(120));
        assert_eq!(d.vehicle_id, Some(4));
    }

    #[test]
    fn test_worklog_serializes_wire_datetime() {
        let w: Worklog =
            serde_json::from_str(r#"{"start_datetime": "2025-03-10T09:00"}"#).unwrap();
        let value = serde_json::to_value(&w).unwrap();
        assert_eq!(value["start_datetime"], "2025-03-10T09:00:00");
        assert!(value["end_datetime"].is_null());
    }
}
