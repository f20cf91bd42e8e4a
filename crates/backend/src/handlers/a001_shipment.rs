use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use contracts::domain::a001_shipment::ShipmentRecord;
use contracts::usecases::u501_import_shipments::{ImportBatchRequest, ImportBatchResponse};

use crate::domain::a001_shipment::{service, SqliteShipmentStore, StoreError};

/// GET /api/a001/shipments
pub async fn list_all() -> Result<Json<Vec<ShipmentRecord>>, StatusCode> {
    match service::list_all(&SqliteShipmentStore).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to fetch shipments: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/a001/shipments/batch
pub async fn import_batch(
    Json(request): Json<ImportBatchRequest>,
) -> Result<Json<ImportBatchResponse>, StatusCode> {
    match service::import_batch(&SqliteShipmentStore, request).await {
        Ok(v) => Ok(Json(v)),
        Err(StoreError::MissingReference { .. }) => Err(StatusCode::BAD_REQUEST),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/a001/shipments/export
pub async fn export_csv() -> Result<impl IntoResponse, StatusCode> {
    let body = service::export_csv(&SqliteShipmentStore).await.map_err(|e| {
        tracing::error!("Failed to export shipments: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"embarques.csv\"",
            ),
        ],
        body,
    ))
}
