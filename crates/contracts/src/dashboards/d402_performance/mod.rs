//! Performance page: clearance and delivery lead times, grouped on the DI
//! registration date.

use serde::{Deserialize, Serialize};

use crate::dashboards::common::{monthly_mean_duration, MonthRange, SeriesPoint, ShipmentKpis};
use crate::domain::a001_shipment::{DateField, ShipmentRecord};

pub const REFERENCE_FIELD: DateField = DateField::DiRegistration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceView {
    pub kpis: ShipmentKpis,
    /// Mean days DI registration -> clearance, January..December
    pub clearance_days: Vec<SeriesPoint>,
    /// Mean days cargo presence -> DI registration, January..December
    pub registration_days: Vec<SeriesPoint>,
    /// Mean days clearance -> truck delivery, fiscal half-year
    pub delivery_days: Vec<SeriesPoint>,
}

impl PerformanceView {
    pub fn build(records: &[&ShipmentRecord]) -> Self {
        let rows = || records.iter().copied();
        Self {
            kpis: ShipmentKpis::compute(records),
            clearance_days: monthly_mean_duration(
                rows(),
                REFERENCE_FIELD,
                DateField::DiRegistration,
                DateField::Clearance,
                MonthRange::FullYear,
            ),
            registration_days: monthly_mean_duration(
                rows(),
                REFERENCE_FIELD,
                DateField::CargoPresence,
                DateField::DiRegistration,
                MonthRange::FullYear,
            ),
            delivery_days: monthly_mean_duration(
                rows(),
                REFERENCE_FIELD,
                DateField::Clearance,
                DateField::TruckDelivery,
                MonthRange::FiscalSlice,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_view_lengths_and_values() {
        let a = ShipmentRecord {
            id: "1".into(),
            bl_awb: "1".into(),
            cargo_presence_date: Some("2024-07-01".into()),
            di_registration_date: Some("2024-07-03".into()),
            clearance_date: Some("2024-07-08".into()),
            truck_delivery_date: Some("2024-07-10".into()),
            ..Default::default()
        };
        let view = PerformanceView::build(&[&a]);
        assert_eq!(view.clearance_days.len(), 12);
        assert_eq!(view.delivery_days.len(), 6);
        assert_eq!(view.clearance_days[6].value, 5.0);
        assert_eq!(view.registration_days[6].value, 2.0);
        assert_eq!(view.delivery_days[0].value, 2.0);
        assert_eq!(view.delivery_days[0].label, "Julho");
    }
}
