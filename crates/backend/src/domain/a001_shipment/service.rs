use anyhow::Context;
use contracts::domain::a001_shipment::ShipmentRecord;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_shipments::{
    ImportBatchRequest, ImportBatchResponse, ImportShipments,
};

use super::store::{ShipmentStore, StoreError};

/// Column order of the CSV export
pub const EXPORT_COLUMNS: [&str; 22] = [
    "id",
    "bl_awb",
    "cargo_type",
    "mode",
    "fcl",
    "incoterm",
    "status",
    "terminal",
    "eta",
    "etd",
    "di_number",
    "di_registration_date",
    "cargo_presence_date",
    "clearance_date",
    "truck_scheduled_date",
    "truck_delivery_date",
    "nf_issue_date",
    "invoice_value",
    "currency",
    "channel",
    "supplier",
    "vessel",
];

/// Entire collection
pub async fn list_all(store: &dyn ShipmentStore) -> Result<Vec<ShipmentRecord>, StoreError> {
    store.fetch_all().await
}

/// Commit mapped spreadsheet rows as one merge-upsert batch
pub async fn import_batch(
    store: &dyn ShipmentStore,
    request: ImportBatchRequest,
) -> Result<ImportBatchResponse, StoreError> {
    let file_name = request.file_name.as_deref().unwrap_or("-");
    tracing::info!(
        "{}: committing {} rows from {}",
        ImportShipments::full_name(),
        request.rows.len(),
        file_name
    );

    let response = store.upsert_merge(&request.rows).await.map_err(|e| {
        tracing::error!("{}: batch rejected: {}", ImportShipments::full_name(), e);
        e
    })?;

    tracing::info!(
        "{}: {} created, {} updated ({} rows)",
        ImportShipments::full_name(),
        response.created,
        response.updated,
        response.total
    );
    Ok(response)
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn csv_row(r: &ShipmentRecord) -> Vec<String> {
    vec![
        r.id.clone(),
        r.bl_awb.clone(),
        opt(&r.cargo_type),
        opt(&r.mode),
        r.fcl.map(|n| n.to_string()).unwrap_or_default(),
        opt(&r.incoterm),
        opt(&r.status),
        opt(&r.terminal),
        opt(&r.eta),
        opt(&r.etd),
        opt(&r.di_number),
        opt(&r.di_registration_date),
        opt(&r.cargo_presence_date),
        opt(&r.clearance_date),
        opt(&r.truck_scheduled_date),
        opt(&r.truck_delivery_date),
        opt(&r.nf_issue_date),
        r.invoice_value.map(|v| format!("{:.2}", v)).unwrap_or_default(),
        opt(&r.currency),
        opt(&r.channel),
        opt(&r.supplier),
        opt(&r.vessel),
    ]
}

/// CSV document of the given records, header first
pub fn records_to_csv(records: &[ShipmentRecord]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS)?;
    for record in records {
        writer.write_record(csv_row(record))?;
    }
    let bytes = writer.into_inner().context("flushing CSV writer")?;
    Ok(String::from_utf8(bytes)?)
}

pub async fn export_csv(store: &dyn ShipmentStore) -> anyhow::Result<String> {
    let records = store.fetch_all().await?;
    records_to_csv(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_shipment::store::MemoryShipmentStore;
    use contracts::domain::a001_shipment::ShipmentPatch;

    fn request(rows: Vec<ShipmentPatch>) -> ImportBatchRequest {
        ImportBatchRequest {
            file_name: Some("embarques.xlsx".into()),
            rows,
        }
    }

    #[tokio::test]
    async fn test_import_then_list() {
        let store = MemoryShipmentStore::new();
        let rows = vec![
            ShipmentPatch {
                bl_awb: "MEDU/001".into(),
                status: Some("IN TRANSIT".into()),
                ..Default::default()
            },
            ShipmentPatch {
                bl_awb: "MEDU/002".into(),
                ..Default::default()
            },
        ];
        let res = import_batch(&store, request(rows)).await.unwrap();
        assert_eq!(res.created, 2);

        let all = list_all(&store).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "MEDU-001");
        // reference-only row keeps nothing but the reference
        assert_eq!(all[1].bl_awb, "MEDU/002");
        assert!(all[1].status.is_none());
    }

    #[tokio::test]
    async fn test_export_has_header_and_rows() {
        let store = MemoryShipmentStore::new();
        let rows = vec![ShipmentPatch {
            bl_awb: "HLCU/9".into(),
            supplier: Some("Acme, Ltda".into()),
            invoice_value: Some(1500.0),
            fcl: Some(2),
            ..Default::default()
        }];
        import_batch(&store, request(rows)).await.unwrap();

        let csv = export_csv(&store).await.unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("id,bl_awb,cargo_type"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("HLCU-9,HLCU/9,"));
        assert!(row.contains("\"Acme, Ltda\""));
        assert!(row.contains("1500.00"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_collection_exports_header_only() {
        let csv = records_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert_eq!(csv.lines().next().unwrap().split(',').count(), EXPORT_COLUMNS.len());
    }
}
