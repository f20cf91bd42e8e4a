//! Operation page: terminal volume and trade terms, grouped on ETA.

use serde::{Deserialize, Serialize};

use crate::dashboards::common::{
    aggregate, monthly_containers_by_terminal, Bucket, Dimension, Measure, MonthRange,
    TerminalSeries,
};
use crate::domain::a001_shipment::{DateField, ShipmentRecord};

pub const REFERENCE_FIELD: DateField = DateField::Eta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationView {
    /// Containers per terminal per month (stacked bars)
    pub monthly_containers: Vec<TerminalSeries>,
    /// Shipments per terminal
    pub by_terminal: Vec<Bucket>,
    /// Shipments per Incoterm
    pub by_incoterm: Vec<Bucket>,
    /// Containers per mode
    pub containers_by_mode: Vec<Bucket>,
}

impl OperationView {
    pub fn build(records: &[&ShipmentRecord]) -> Self {
        let rows = || records.iter().copied();
        Self {
            monthly_containers: monthly_containers_by_terminal(
                rows(),
                REFERENCE_FIELD,
                MonthRange::FullYear,
            ),
            by_terminal: aggregate(rows(), Dimension::Terminal, &Measure::Count),
            by_incoterm: aggregate(rows(), Dimension::Incoterm, &Measure::Count),
            containers_by_mode: aggregate(rows(), Dimension::Mode, &Measure::Containers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_view() {
        let a = ShipmentRecord {
            id: "1".into(),
            bl_awb: "1".into(),
            incoterm: Some("CIF".into()),
            mode: Some("LCL".into()),
            fcl: Some(4),
            terminal: Some("Multilog".into()),
            eta: Some("2024-09-01".into()),
            ..Default::default()
        };
        let view = OperationView::build(&[&a]);
        let multilog = view
            .monthly_containers
            .iter()
            .find(|s| s.terminal == "MULTILOG")
            .unwrap();
        assert_eq!(multilog.points[8].count, 1);
        assert_eq!(multilog.total(), 0.0);
        let cif = view.by_incoterm.iter().find(|b| b.key == "CIF").unwrap();
        assert_eq!(cif.count, 1);
    }
}
