use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::UploadResponse,
};

/// A file part pulled out of a multipart body.
pub(crate) struct FilePart {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Turns a rejected multipart body into the usual JSON error.
pub(crate) fn require_multipart(
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Multipart> {
    multipart.map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// Reads the part called `field_name`, skipping every other part.
pub(crate) async fn read_file_field(
    multipart: &mut Multipart,
    field_name: &str,
) -> ApiResult<FilePart> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some(field_name) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            ApiError::BadRequest(format!("Failed to read file content: {}", e))
        })?;
        return Ok(FilePart {
            file_name,
            bytes: bytes.to_vec(),
        });
    }
    Err(ApiError::BadRequest(format!("{} is required", field_name)))
}

#[utoipa::path(
    post,
    path = "/api/upload",
    responses(
        (status = 201, body = UploadResponse),
        (status = 400, body = crate::error::ErrorBody),
        (status = 401, body = crate::error::ErrorBody)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let mut multipart = require_multipart(multipart)?;
    let part = read_file_field(&mut multipart, "file").await?;
    let url = state
        .uploads
        .save(part.file_name.as_deref(), &part.bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store upload: {}", e)))?;
    Ok((StatusCode::CREATED, Json(UploadResponse { url })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/upload", post(upload_file))
}
