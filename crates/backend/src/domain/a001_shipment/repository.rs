use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::a001_shipment::{ShipmentPatch, ShipmentRecord};
use contracts::usecases::u501_import_shipments::ImportBatchResponse;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::store::{plan_batch, ShipmentStore, StoreError};
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_shipment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub bl_awb: String,
    pub cargo_type: Option<String>,
    pub mode: Option<String>,
    pub fcl: Option<i32>,
    pub incoterm: Option<String>,
    pub status: Option<String>,
    pub terminal: Option<String>,
    pub eta: Option<String>,
    pub etd: Option<String>,
    pub di_number: Option<String>,
    pub di_registration_date: Option<String>,
    pub cargo_presence_date: Option<String>,
    pub clearance_date: Option<String>,
    pub truck_scheduled_date: Option<String>,
    pub truck_delivery_date: Option<String>,
    pub nf_issue_date: Option<String>,
    pub invoice_value: Option<f64>,
    pub currency: Option<String>,
    pub channel: Option<String>,
    pub supplier: Option<String>,
    pub vessel: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ShipmentRecord {
    fn from(m: Model) -> Self {
        ShipmentRecord {
            id: m.id,
            bl_awb: m.bl_awb,
            cargo_type: m.cargo_type,
            mode: m.mode,
            fcl: m.fcl.and_then(|n| u32::try_from(n).ok()),
            incoterm: m.incoterm,
            status: m.status,
            terminal: m.terminal,
            eta: m.eta,
            etd: m.etd,
            di_number: m.di_number,
            di_registration_date: m.di_registration_date,
            cargo_presence_date: m.cargo_presence_date,
            clearance_date: m.clearance_date,
            truck_scheduled_date: m.truck_scheduled_date,
            truck_delivery_date: m.truck_delivery_date,
            nf_issue_date: m.nf_issue_date,
            invoice_value: m.invoice_value,
            currency: m.currency,
            channel: m.channel,
            supplier: m.supplier,
            vessel: m.vessel,
            updated_at: m.updated_at,
        }
    }
}

/// Every column set, ready for insert or full update
fn active_from(record: &ShipmentRecord, created_at: Option<String>) -> ActiveModel {
    ActiveModel {
        id: Set(record.id.clone()),
        bl_awb: Set(record.bl_awb.clone()),
        cargo_type: Set(record.cargo_type.clone()),
        mode: Set(record.mode.clone()),
        fcl: Set(record.fcl.and_then(|n| i32::try_from(n).ok())),
        incoterm: Set(record.incoterm.clone()),
        status: Set(record.status.clone()),
        terminal: Set(record.terminal.clone()),
        eta: Set(record.eta.clone()),
        etd: Set(record.etd.clone()),
        di_number: Set(record.di_number.clone()),
        di_registration_date: Set(record.di_registration_date.clone()),
        cargo_presence_date: Set(record.cargo_presence_date.clone()),
        clearance_date: Set(record.clearance_date.clone()),
        truck_scheduled_date: Set(record.truck_scheduled_date.clone()),
        truck_delivery_date: Set(record.truck_delivery_date.clone()),
        nf_issue_date: Set(record.nf_issue_date.clone()),
        invoice_value: Set(record.invoice_value),
        currency: Set(record.currency.clone()),
        channel: Set(record.channel.clone()),
        supplier: Set(record.supplier.clone()),
        vessel: Set(record.vessel.clone()),
        created_at: Set(created_at),
        updated_at: Set(record.updated_at.clone()),
    }
}

/// SQLite-backed store on the global connection
pub struct SqliteShipmentStore;

#[async_trait]
impl ShipmentStore for SqliteShipmentStore {
    async fn fetch_all(&self) -> Result<Vec<ShipmentRecord>, StoreError> {
        let items = Entity::find()
            .order_by_asc(Column::Id)
            .all(get_connection())
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(items)
    }

    async fn upsert_merge(&self, patches: &[ShipmentPatch]) -> Result<ImportBatchResponse, StoreError> {
        let ids: Vec<String> = patches
            .iter()
            .map(|p| p.document_id())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let txn = get_connection().begin().await?;

        let mut existing = HashMap::new();
        // SQLite caps bound parameters per statement
        for chunk in ids.chunks(500) {
            let found = Entity::find()
                .filter(Column::Id.is_in(chunk.to_vec()))
                .all(&txn)
                .await?;
            for model in found {
                existing.insert(model.id.clone(), ShipmentRecord::from(model));
            }
        }

        let plan = plan_batch(existing, patches)?;
        let now = Utc::now().to_rfc3339();
        for record in &plan.records {
            if plan.created.contains(&record.id) {
                active_from(record, Some(now.clone())).insert(&txn).await?;
            } else {
                let mut active = active_from(record, None);
                active.created_at = sea_orm::ActiveValue::NotSet;
                active.update(&txn).await?;
            }
        }

        txn.commit().await?;
        Ok(plan.response)
    }
}
