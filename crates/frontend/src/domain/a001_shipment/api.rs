use contracts::domain::a001_shipment::ShipmentRecord;
use contracts::usecases::u501_import_shipments::{ImportBatchRequest, ImportBatchResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, authorized_get, bearer};

/// Whole shipment collection in one read
pub async fn fetch_all(access_token: &str) -> Result<Vec<ShipmentRecord>, String> {
    authorized_get("/api/a001/shipments", access_token).await
}

/// Commit mapped rows as one merge-upsert batch
pub async fn import_batch(
    access_token: &str,
    request: &ImportBatchRequest,
) -> Result<ImportBatchResponse, String> {
    let response = Request::post(&api_url("/api/a001/shipments/batch"))
        .header("Authorization", &bearer(access_token))
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|_| "Servidor indisponível".to_string())?;

    match response.status() {
        200 => response
            .json::<ImportBatchResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e)),
        400 => Err("O lote contém linhas sem BL/AWB".to_string()),
        status => Err(format!("Falha ao gravar o lote ({})", status)),
    }
}

/// Server-side CSV of every stored shipment
pub async fn export_csv(access_token: &str) -> Result<String, String> {
    let response = Request::get(&api_url("/api/a001/shipments/export"))
        .header("Authorization", &bearer(access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Export failed: {}", response.status()));
    }

    response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))
}
