use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use wishlist_core::errors::Error as CoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

const STORAGE_ERROR: &str = "Storage error";
const INTERNAL_ERROR: &str = "Internal server error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) | CoreError::Interchange(_) => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, e.to_string()),
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                CoreError::Database(_) => {
                    tracing::error!("Storage failure: {}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, STORAGE_ERROR.to_string())
                }
                CoreError::Unexpected(_) => {
                    tracing::error!("Unexpected failure: {}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
                }
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Internal(reason) => {
                tracing::error!("Internal failure: {}", reason);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            ApiError::Anyhow(e) => {
                tracing::error!("Internal failure: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
        };
        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
