//! Brokerage page: customs declarations, grouped on the DI registration date.

use serde::{Deserialize, Serialize};

use crate::dashboards::common::{
    aggregate, monthly_unique_di, Bucket, Dimension, Measure, MonthRange, SeriesPoint,
};
use crate::domain::a001_shipment::{DateField, ShipmentRecord};

pub const REFERENCE_FIELD: DateField = DateField::DiRegistration;

/// Currency the invoice-value chart is summed in
pub const INVOICE_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerageView {
    /// Distinct DIs per parametrization channel
    pub di_by_channel: Vec<Bucket>,
    /// Distinct DIs registered per month
    pub monthly_registrations: Vec<SeriesPoint>,
    /// Invoice value per Incoterm in [`INVOICE_CURRENCY`]
    pub invoice_by_incoterm: Vec<Bucket>,
}

impl BrokerageView {
    pub fn build(records: &[&ShipmentRecord]) -> Self {
        let rows = || records.iter().copied();
        Self {
            di_by_channel: aggregate(rows(), Dimension::Channel, &Measure::UniqueDi),
            monthly_registrations: monthly_unique_di(rows(), REFERENCE_FIELD, MonthRange::FullYear),
            invoice_by_incoterm: aggregate(
                rows(),
                Dimension::Incoterm,
                &Measure::InvoiceValue {
                    currency: Some(INVOICE_CURRENCY.to_string()),
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, channel: &str) -> ShipmentRecord {
        ShipmentRecord {
            id: id.into(),
            bl_awb: id.into(),
            di_number: Some("24/1".into()),
            di_registration_date: Some("2024-02-02".into()),
            channel: Some(channel.into()),
            incoterm: Some("FOB".into()),
            invoice_value: Some(10.0),
            currency: Some("USD".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_brokerage_view_counts_di_once() {
        let (a, b) = (row("1", "Verde"), row("2", "GREEN"));
        let view = BrokerageView::build(&[&a, &b]);
        let green = &view.di_by_channel[0];
        assert_eq!(green.key, "GREEN");
        assert_eq!(green.value, 1.0);
        assert_eq!(green.count, 2);
        assert_eq!(view.monthly_registrations[1].value, 1.0);
        let fob = view.invoice_by_incoterm.iter().find(|b| b.key == "FOB").unwrap();
        assert_eq!(fob.value, 20.0);
    }
}
