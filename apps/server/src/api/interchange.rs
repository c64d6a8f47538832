use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::task;
use wishlist_storage_sqlite::db;

use super::files::{read_file_field, require_multipart};
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::RestoreResponse,
};

#[utoipa::path(
    get,
    path = "/api/export/csv",
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv"),
        (status = 401, body = crate::error::ErrorBody)
    )
)]
pub async fn export_csv(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let csv = state.interchange_service.export_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"wishlist.csv\"",
            ),
        ],
        csv,
    ))
}

#[utoipa::path(
    post,
    path = "/api/restore/csv",
    responses(
        (status = 200, body = RestoreResponse),
        (status = 400, body = crate::error::ErrorBody),
        (status = 401, body = crate::error::ErrorBody)
    )
)]
pub async fn restore_csv(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<RestoreResponse>> {
    let mut multipart = require_multipart(multipart)?;
    let part = read_file_field(&mut multipart, "file").await?;
    let added = state.interchange_service.import_csv(&part.bytes).await?;
    tracing::info!("CSV restore added {} wish(es)", added);
    Ok(Json(RestoreResponse { ok: true, added }))
}

#[utoipa::path(
    get,
    path = "/api/backup/sqlite",
    responses(
        (status = 200, description = "SQLite database snapshot", content_type = "application/octet-stream"),
        (status = 401, body = crate::error::ErrorBody)
    )
)]
pub async fn backup_sqlite(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let db_path = state.db_path.clone();
    let bytes = task::spawn_blocking(move || db::backup_database(&db_path))
        .await
        .map_err(|e| ApiError::Internal(format!("Backup task failed: {}", e)))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"db.sqlite\"",
            ),
        ],
        bytes,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/export/csv", get(export_csv))
        .route("/restore/csv", post(restore_csv))
        .route("/backup/sqlite", get(backup_sqlite))
}
