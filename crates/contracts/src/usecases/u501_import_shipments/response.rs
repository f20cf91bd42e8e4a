use serde::{Deserialize, Serialize};

/// Result of a committed batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportBatchResponse {
    /// Documents that did not exist before the batch
    pub created: usize,

    /// Existing documents merged with the batch rows
    pub updated: usize,

    /// Rows received (duplicates of one key inside the batch included)
    pub total: usize,
}
