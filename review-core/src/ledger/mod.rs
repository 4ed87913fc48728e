//! Line-Item Ledger
//!
//! The four editable collections of an order under review. Items are
//! kept in display order and addressed by index. The ledger itself does
//! no pricing; [`crate::session::ReviewSession`] recomputes totals after
//! every mutation.

mod fields;

pub use fields::*;

use crate::error::{ReviewError, ReviewResult};
use shared::{AdditionalService, Displacement, Material, OrderDetail, Worklog};

/// Ordered, index-addressed collection of one item kind
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemList<T> {
    items: Vec<T>,
}

impl<T: LedgerItem> ItemList<T> {
    /// Wrap loaded items, clamping out-of-range values
    pub fn new(mut items: Vec<T>) -> Self {
        items.iter_mut().for_each(T::clamp_values);
        Self { items }
    }

    /// Append a default-valued item, returning its index
    pub fn add(&mut self) -> usize {
        self.items.push(T::default());
        self.items.len() - 1
    }

    pub fn remove_at(&mut self, index: usize) -> ReviewResult<T> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    pub fn update_field(&mut self, index: usize, field: T::Field, raw: &str) -> ReviewResult<()> {
        self.check_index(index)?;
        let item = &mut self.items[index];
        item.set_field(field, raw);
        item.clamp_values();
        Ok(())
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    fn check_index(&self, index: usize) -> ReviewResult<()> {
        if index >= self.items.len() {
            tracing::warn!(kind = T::KIND, index, len = self.items.len(), "Ledger index out of range");
            return Err(ReviewError::IndexOutOfRange {
                kind: T::KIND,
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

/// Materials, worklogs, displacements and additional services of one order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ledger {
    materials: ItemList<Material>,
    worklogs: ItemList<Worklog>,
    displacements: ItemList<Displacement>,
    additional_services: ItemList<AdditionalService>,
}

impl Ledger {
    pub fn new(
        materials: Vec<Material>,
        worklogs: Vec<Worklog>,
        displacements: Vec<Displacement>,
        additional_services: Vec<AdditionalService>,
    ) -> Self {
        Self {
            materials: ItemList::new(materials),
            worklogs: ItemList::new(worklogs),
            displacements: ItemList::new(displacements),
            additional_services: ItemList::new(additional_services),
        }
    }

    /// Split an order detail into its line items
    pub fn from_detail(detail: &OrderDetail) -> Self {
        Self::new(
            detail.materials.clone(),
            detail.worklogs.clone(),
            detail.displacements.clone(),
            detail.additional_services.clone(),
        )
    }

    /// Typed access to one collection
    pub fn list<T: LedgerItem>(&self) -> &ItemList<T> {
        T::list(self)
    }

    pub fn add<T: LedgerItem>(&mut self) -> usize {
        T::list_mut(self).add()
    }

    pub fn remove_at<T: LedgerItem>(&mut self, index: usize) -> ReviewResult<T> {
        T::list_mut(self).remove_at(index)
    }

    /// Coerce raw input into one field; the item kind follows from the field type
    pub fn update_field<F: LedgerField>(&mut self, index: usize, field: F, raw: &str) -> ReviewResult<()> {
        <F::Item as LedgerItem>::list_mut(self).update_field(index, field, raw)
    }

    pub fn materials(&self) -> &[Material] {
        self.materials.items()
    }

    pub fn worklogs(&self) -> &[Worklog] {
        self.worklogs.items()
    }

    pub fn displacements(&self) -> &[Displacement] {
        self.displacements.items()
    }

    pub fn additional_services(&self) -> &[AdditionalService] {
        self.additional_services.items()
    }

    pub(crate) fn worklogs_mut(&mut self) -> &mut ItemList<Worklog> {
        &mut self.worklogs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::KmOption;

    #[test]
    fn test_add_appends_default_item() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.add::<Material>(), 0);
        assert_eq!(ledger.add::<Material>(), 1);
        assert_eq!(ledger.materials().len(), 2);
        assert_eq!(ledger.materials()[1], Material::default());
    }

    #[test]
    fn test_update_field_coerces_numbers() {
        let mut ledger = Ledger::default();
        let idx = ledger.add::<Material>();
        ledger.update_field(idx, MaterialField::Name, "Correia").unwrap();
        ledger.update_field(idx, MaterialField::Quantity, "2,5").unwrap();
        ledger.update_field(idx, MaterialField::UnitPrice, "not a price").unwrap();

        let m = &ledger.materials()[idx];
        assert_eq!(m.name, "Correia");
        assert_eq!(m.quantity, Decimal::new(25, 1));
        assert_eq!(m.unit_price, Decimal::ZERO);
    }

    #[test]
    fn test_setting_worklog_datetime_clears_hours() {
        let mut ledger = Ledger::new(
            vec![],
            vec![Worklog {
                hours: Some(Decimal::from(4)),
                ..Default::default()
            }],
            vec![],
            vec![],
        );
        ledger.update_field(0, WorklogField::Start, "2025-03-10T09:00").unwrap();
        assert_eq!(ledger.worklogs()[0].hours, None);
        assert!(ledger.worklogs()[0].start_datetime.is_some());

        ledger.update_field(0, WorklogField::Hours, "3").unwrap();
        assert_eq!(ledger.worklogs()[0].hours, Some(Decimal::from(3)));
        ledger.update_field(0, WorklogField::End, "garbage").unwrap();
        assert_eq!(ledger.worklogs()[0].hours, None);
        assert_eq!(ledger.worklogs()[0].end_datetime, None);
    }

    #[test]
    fn test_displacement_fields() {
        let mut ledger = Ledger::default();
        let idx = ledger.add::<Displacement>();
        ledger.update_field(idx, DisplacementField::KmOption, "Acima de 100 km").unwrap();
        ledger.update_field(idx, DisplacementField::KmTotal, "130").unwrap();
        ledger.update_field(idx, DisplacementField::VehicleId, "3").unwrap();

        let d = &ledger.displacements()[idx];
        assert_eq!(d.km_option, KmOption::Above100);
        assert_eq!(d.km_total, Decimal::from(130));
        assert_eq!(d.vehicle_id, Some(3));

        ledger.update_field(idx, DisplacementField::VehicleId, "").unwrap();
        assert_eq!(ledger.displacements()[idx].vehicle_id, None);
    }

    #[test]
    fn test_remove_at() {
        let mut ledger = Ledger::default();
        ledger.add::<AdditionalService>();
        ledger.add::<AdditionalService>();
        ledger
            .update_field(1, AdditionalServiceField::Description, "Pintura")
            .unwrap();

        let removed: AdditionalService = ledger.remove_at(0).unwrap();
        assert_eq!(removed.description, "");
        assert_eq!(ledger.additional_services().len(), 1);
        assert_eq!(ledger.additional_services()[0].description, "Pintura");
    }

    #[test]
    fn test_out_of_range_leaves_ledger_unchanged() {
        let mut ledger = Ledger::default();
        ledger.add::<Material>();
        let before = ledger.clone();

        let err = ledger.update_field(5, MaterialField::Quantity, "1").unwrap_err();
        assert_eq!(
            err,
            ReviewError::IndexOutOfRange {
                kind: "material",
                index: 5,
                len: 1
            }
        );
        assert!(ledger.remove_at::<Worklog>(0).is_err());
        assert_eq!(ledger, before);
    }
}
