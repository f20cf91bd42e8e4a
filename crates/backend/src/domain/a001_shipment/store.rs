//! Document-store seam for shipments.
//!
//! The store exposes exactly two operations: fetch the whole collection and
//! merge-upsert a batch keyed by the sanitized BL/AWB. A batch is applied
//! completely or not at all.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::a001_shipment::{ShipmentPatch, ShipmentRecord};
use contracts::usecases::u501_import_shipments::ImportBatchResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Row {index} has an empty BL/AWB")]
    MissingReference { index: usize },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ShipmentStore: Send + Sync {
    /// Whole collection ordered by document key
    async fn fetch_all(&self) -> Result<Vec<ShipmentRecord>, StoreError>;

    /// Merge-upsert; fields absent from a patch keep their stored value
    async fn upsert_merge(&self, patches: &[ShipmentPatch]) -> Result<ImportBatchResponse, StoreError>;
}

/// Documents to write for a batch, plus the counts reported back
#[derive(Debug, Default)]
pub struct BatchPlan {
    pub records: Vec<ShipmentRecord>,
    /// Keys that did not exist before the batch
    pub created: HashSet<String>,
    pub response: ImportBatchResponse,
}

/// Fold a batch onto the existing documents. Several rows of one key inside
/// the batch merge in order, the last one winning per field.
pub fn plan_batch(
    mut existing: HashMap<String, ShipmentRecord>,
    patches: &[ShipmentPatch],
) -> Result<BatchPlan, StoreError> {
    let now = Utc::now().to_rfc3339();
    let mut order: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut created: HashSet<String> = HashSet::new();

    for (index, patch) in patches.iter().enumerate() {
        let id = patch.document_id();
        if id.is_empty() {
            return Err(StoreError::MissingReference { index });
        }
        match existing.get_mut(&id) {
            Some(record) => record.merge(patch),
            None => {
                existing.insert(id.clone(), ShipmentRecord::from_patch(patch));
                created.insert(id.clone());
            }
        }
        if seen.insert(id.clone()) {
            order.push(id);
        }
    }

    let mut records = Vec::with_capacity(order.len());
    for id in &order {
        if let Some(mut record) = existing.remove(id) {
            record.updated_at = Some(now.clone());
            records.push(record);
        }
    }

    let response = ImportBatchResponse {
        created: created.len(),
        updated: order.len() - created.len(),
        total: patches.len(),
    };
    Ok(BatchPlan {
        records,
        created,
        response,
    })
}

/// Store kept in process memory
#[derive(Default)]
pub struct MemoryShipmentStore {
    docs: Mutex<HashMap<String, ShipmentRecord>>,
}

impl MemoryShipmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShipmentStore for MemoryShipmentStore {
    async fn fetch_all(&self) -> Result<Vec<ShipmentRecord>, StoreError> {
        let docs = self
            .docs
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let mut all: Vec<ShipmentRecord> = docs.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn upsert_merge(&self, patches: &[ShipmentPatch]) -> Result<ImportBatchResponse, StoreError> {
        let mut docs = self
            .docs
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let plan = plan_batch(docs.clone(), patches)?;
        for record in plan.records {
            docs.insert(record.id.clone(), record);
        }
        Ok(plan.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(bl: &str) -> ShipmentPatch {
        ShipmentPatch {
            bl_awb: bl.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_merge_upsert_keeps_untouched_fields() {
        let store = MemoryShipmentStore::new();
        let first = ShipmentPatch {
            status: Some("IN TRANSIT".into()),
            terminal: Some("Portonave".into()),
            ..patch("MSCU/1")
        };
        let res = store.upsert_merge(&[first]).await.unwrap();
        assert_eq!(res.created, 1);

        let second = ShipmentPatch {
            status: Some("AT THE PORT".into()),
            ..patch("MSCU/1")
        };
        let res = store.upsert_merge(&[second]).await.unwrap();
        assert_eq!((res.created, res.updated, res.total), (0, 1, 1));

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "MSCU-1");
        assert_eq!(all[0].status.as_deref(), Some("AT THE PORT"));
        assert_eq!(all[0].terminal.as_deref(), Some("Portonave"));
        assert!(all[0].updated_at.is_some());
    }

    #[tokio::test]
    async fn test_batch_with_blank_reference_is_rejected_whole() {
        let store = MemoryShipmentStore::new();
        let err = store
            .upsert_merge(&[patch("A1"), patch("  ")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingReference { index: 1 }));
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_keys_in_one_batch() {
        let a = ShipmentPatch {
            eta: Some("2024-01-01".into()),
            ..patch("X/1")
        };
        let b = ShipmentPatch {
            eta: Some("2024-02-01".into()),
            vessel: Some("MSC ANNA".into()),
            ..patch("X-1")
        };
        let plan = plan_batch(HashMap::new(), &[a, b]).unwrap();
        assert_eq!(plan.records.len(), 1);
        assert_eq!(plan.records[0].eta.as_deref(), Some("2024-02-01"));
        assert_eq!(plan.response.created, 1);
        assert_eq!(plan.response.updated, 0);
        assert_eq!(plan.response.total, 2);
    }

    #[test]
    fn test_large_batch_keeps_first_seen_order() {
        let mut existing = HashMap::new();
        existing.insert("K-0".to_string(), ShipmentRecord::from_patch(&patch("K/0")));

        let patches: Vec<ShipmentPatch> = (0..20_000)
            .map(|i| patch(&format!("K/{}", i % 5_000)))
            .collect();
        let plan = plan_batch(existing, &patches).unwrap();

        assert_eq!(plan.records.len(), 5_000);
        assert_eq!(plan.records[0].id, "K-0");
        assert_eq!(plan.records[4_999].id, "K-4999");
        assert_eq!(plan.created.len(), 4_999);
        assert!(!plan.created.contains("K-0"));
        assert_eq!(
            (plan.response.created, plan.response.updated, plan.response.total),
            (4_999, 1, 20_000)
        );
    }
}
