use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::bucket::{aggregate, Dimension, Measure};
use crate::domain::a001_shipment::{DateField, ShipmentRecord};
use crate::shared::date_utils::days_between;

/// Headline numbers shown above the charts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipmentKpis {
    pub total_shipments: usize,
    pub containers: u32,
    pub distinct_di: usize,
    /// Mean DI registration -> clearance days, `None` without a complete pair
    pub mean_clearance_days: Option<f64>,
    /// Rows per status, in lifecycle order
    pub by_status: Vec<(String, usize)>,
}

impl ShipmentKpis {
    pub fn compute(records: &[&ShipmentRecord]) -> Self {
        let containers: u32 = records.iter().map(|r| r.container_count()).sum();
        let distinct_di = records
            .iter()
            .filter_map(|r| r.di_key())
            .collect::<HashSet<_>>()
            .len();

        let durations: Vec<i64> = records
            .iter()
            .filter_map(|r| {
                days_between(r.date(DateField::DiRegistration), r.date(DateField::Clearance))
            })
            .collect();
        let mean_clearance_days = if durations.is_empty() {
            None
        } else {
            let mean = durations.iter().sum::<i64>() as f64 / durations.len() as f64;
            Some((mean * 10.0).round() / 10.0)
        };

        let by_status = aggregate(records.iter().copied(), Dimension::Status, &Measure::Count)
            .into_iter()
            .map(|b| (b.key, b.count))
            .collect();

        Self {
            total_shipments: records.len(),
            containers,
            distinct_di,
            mean_clearance_days,
            by_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpis() {
        let a = ShipmentRecord {
            id: "1".into(),
            bl_awb: "1".into(),
            mode: Some("FCL".into()),
            fcl: Some(3),
            status: Some("IN TRANSIT".into()),
            di_number: Some("D1".into()),
            di_registration_date: Some("2024-01-01".into()),
            clearance_date: Some("2024-01-04".into()),
            ..Default::default()
        };
        let b = ShipmentRecord {
            id: "2".into(),
            bl_awb: "2".into(),
            mode: Some("LCL".into()),
            fcl: Some(3),
            di_number: Some(" D1 ".into()),
            ..Default::default()
        };
        let kpis = ShipmentKpis::compute(&[&a, &b]);
        assert_eq!(kpis.total_shipments, 2);
        assert_eq!(kpis.containers, 3);
        assert_eq!(kpis.distinct_di, 1);
        assert_eq!(kpis.mean_clearance_days, Some(3.0));
        assert_eq!(kpis.by_status[0], ("IN TRANSIT".to_string(), 1));
        assert_eq!(kpis.by_status.len(), 5);
    }

    #[test]
    fn test_empty_kpis() {
        let kpis = ShipmentKpis::compute(&[]);
        assert_eq!(kpis.total_shipments, 0);
        assert_eq!(kpis.mean_clearance_days, None);
    }
}
