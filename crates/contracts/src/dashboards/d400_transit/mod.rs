//! Transit page: shipments on their way, grouped on ETA.

use serde::{Deserialize, Serialize};

use crate::dashboards::common::{aggregate, Bucket, Dimension, Measure, ShipmentKpis};
use crate::domain::a001_shipment::{DateField, ShipmentRecord};

pub const REFERENCE_FIELD: DateField = DateField::Eta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitView {
    pub kpis: ShipmentKpis,
    /// Shipments per lifecycle status
    pub by_status: Vec<Bucket>,
    /// Containers per destination terminal
    pub containers_by_terminal: Vec<Bucket>,
    /// Shipments per mode
    pub by_mode: Vec<Bucket>,
}

impl TransitView {
    pub fn build(records: &[&ShipmentRecord]) -> Self {
        let rows = || records.iter().copied();
        Self {
            kpis: ShipmentKpis::compute(records),
            by_status: aggregate(rows(), Dimension::Status, &Measure::Count),
            containers_by_terminal: aggregate(rows(), Dimension::Terminal, &Measure::Containers),
            by_mode: aggregate(rows(), Dimension::Mode, &Measure::Count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transit_view() {
        let a = ShipmentRecord {
            id: "1".into(),
            bl_awb: "1".into(),
            status: Some("IN TRANSIT".into()),
            mode: Some("FCL".into()),
            fcl: Some(2),
            terminal: Some("BTP Santos".into()),
            ..Default::default()
        };
        let view = TransitView::build(&[&a]);
        assert_eq!(view.by_status[0].count, 1);
        let btp = view.containers_by_terminal.iter().find(|b| b.key == "BTP").unwrap();
        assert_eq!(btp.value, 2.0);
        assert_eq!(view.by_mode[0].key, "FCL");
        assert_eq!(view.kpis.containers, 2);
    }
}
