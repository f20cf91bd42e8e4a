use serde::{Deserialize, Serialize};

use crate::domain::a001_shipment::ShipmentPatch;

/// Batch merge-upsert of mapped spreadsheet rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportBatchRequest {
    /// Name of the uploaded file, only used for logging
    #[serde(default)]
    pub file_name: Option<String>,

    pub rows: Vec<ShipmentPatch>,
}
