//! Per-field coercion for ledger items
//!
//! Raw form input arrives as text. Numeric fields go through
//! [`parse_decimal`] (zero on failure); datetimes through
//! [`parse_datetime`] (`None` on failure), then get clamped to the
//! caps in [`crate::money`]. Nothing here can fail.

use super::{ItemList, Ledger};
use crate::money::{MAX_HOURS, MAX_KM, MAX_PRICE, MAX_QUANTITY, clamp_input};
use shared::util::{parse_datetime, parse_decimal};
use shared::{AdditionalService, Displacement, KmOption, Material, Worklog};
use std::fmt::Debug;

/// An editable line item kind
pub trait LedgerItem: Clone + Debug + Default {
    /// Field selector for [`LedgerItem::set_field`]
    type Field: Copy + Debug;

    /// Name used in logs and errors
    const KIND: &'static str;

    /// Coerce `raw` into the given field
    fn set_field(&mut self, field: Self::Field, raw: &str);

    /// Pull numeric fields back inside their caps
    fn clamp_values(&mut self);

    fn list(ledger: &Ledger) -> &ItemList<Self>;

    fn list_mut(ledger: &mut Ledger) -> &mut ItemList<Self>;
}

/// Field selector that knows which item kind it belongs to
pub trait LedgerField: Copy + Debug {
    type Item: LedgerItem<Field = Self>;
}

// ============================================================================
// Materials
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialField {
    Name,
    Quantity,
    UnitPrice,
}

impl LedgerField for MaterialField {
    type Item = Material;
}

impl LedgerItem for Material {
    type Field = MaterialField;
    const KIND: &'static str = "material";

    fn set_field(&mut self, field: MaterialField, raw: &str) {
        match field {
            MaterialField::Name => self.name = raw.to_string(),
            MaterialField::Quantity => self.quantity = parse_decimal(raw),
            MaterialField::UnitPrice => self.unit_price = parse_decimal(raw),
        }
    }

    fn clamp_values(&mut self) {
        self.quantity = clamp_input(self.quantity, MAX_QUANTITY, "quantity");
        self.unit_price = clamp_input(self.unit_price, MAX_PRICE, "unit_price");
    }

    fn list(ledger: &Ledger) -> &ItemList<Self> {
        &ledger.materials
    }

    fn list_mut(ledger: &mut Ledger) -> &mut ItemList<Self> {
        &mut ledger.materials
    }
}

// ============================================================================
// Worklogs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorklogField {
    Start,
    End,
    Hours,
}

impl LedgerField for WorklogField {
    type Item = Worklog;
}

impl LedgerItem for Worklog {
    type Field = WorklogField;
    const KIND: &'static str = "worklog";

    fn set_field(&mut self, field: WorklogField, raw: &str) {
        match field {
            // A new timestamp invalidates the cached hours
            WorklogField::Start => {
                self.start_datetime = parse_datetime(raw);
                self.hours = None;
            }
            WorklogField::End => {
                self.end_datetime = parse_datetime(raw);
                self.hours = None;
            }
            WorklogField::Hours => {
                self.hours = (!raw.trim().is_empty()).then(|| parse_decimal(raw));
            }
        }
    }

    fn clamp_values(&mut self) {
        self.hours = self.hours.map(|h| clamp_input(h, MAX_HOURS, "hours"));
    }

    fn list(ledger: &Ledger) -> &ItemList<Self> {
        &ledger.worklogs
    }

    fn list_mut(ledger: &mut Ledger) -> &mut ItemList<Self> {
        &mut ledger.worklogs
    }
}

// ============================================================================
// Displacements
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplacementField {
    KmOption,
    KmTotal,
    VehicleId,
}

impl LedgerField for DisplacementField {
    type Item = Displacement;
}

impl LedgerItem for Displacement {
    type Field = DisplacementField;
    const KIND: &'static str = "displacement";

    fn set_field(&mut self, field: DisplacementField, raw: &str) {
        match field {
            DisplacementField::KmOption => self.km_option = KmOption::normalize(raw),
            DisplacementField::KmTotal => self.km_total = parse_decimal(raw),
            DisplacementField::VehicleId => {
                self.vehicle_id = raw.trim().parse::<i64>().ok().filter(|id| *id > 0);
            }
        }
    }

    fn clamp_values(&mut self) {
        self.km_total = clamp_input(self.km_total, MAX_KM, "km_total");
    }

    fn list(ledger: &Ledger) -> &ItemList<Self> {
        &ledger.displacements
    }

    fn list_mut(ledger: &mut Ledger) -> &mut ItemList<Self> {
        &mut ledger.displacements
    }
}

// ============================================================================
// Additional services
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionalServiceField {
    Description,
    Value,
}

impl LedgerField for AdditionalServiceField {
    type Item = AdditionalService;
}

impl LedgerItem for AdditionalService {
    type Field = AdditionalServiceField;
    const KIND: &'static str = "additional service";

    fn set_field(&mut self, field: AdditionalServiceField, raw: &str) {
        match field {
            AdditionalServiceField::Description => self.description = raw.to_string(),
            AdditionalServiceField::Value => self.value = parse_decimal(raw),
        }
    }

    fn clamp_values(&mut self) {
        self.value = clamp_input(self.value, MAX_PRICE, "value");
    }

    fn list(ledger: &Ledger) -> &ItemList<Self> {
        &ledger.additional_services
    }

    fn list_mut(ledger: &mut Ledger) -> &mut ItemList<Self> {
        &mut ledger.additional_services
    }
}
