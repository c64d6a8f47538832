use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Multipart, Path, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use wishlist_core::wishes::{FlagInput, PriceInput, WishInput};

use super::{parse_id, ITEM_COLLECTIONS};
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{DeleteResponse, Wish, WishPayload},
};

/// An image file sent along with a multipart create request.
struct ImageUpload {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

/// Create payload: either a JSON body or a multipart form whose `image` part
/// may carry a file.
pub struct WishSubmission {
    input: WishInput,
    image: Option<ImageUpload>,
}

impl FromRequest<Arc<AppState>> for WishSubmission {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|ct| ct.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if !is_multipart {
            let Json(payload) = Json::<WishPayload>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            return Ok(Self {
                input: payload.into(),
                image: None,
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        let mut input = WishInput::default();
        let mut image = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
        })? {
            let name = field.name().unwrap_or("").to_string();
            if name == "image" && field.file_name().is_some() {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read image: {}", e))
                })?;
                if !bytes.is_empty() {
                    image = Some(ImageUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                continue;
            }

            let value = field.text().await.map_err(|e| {
                ApiError::BadRequest(format!("Failed to read field '{}': {}", name, e))
            })?;
            match name.as_str() {
                "title" => input.title = Some(value),
                "description" => input.description = Some(value),
                "price" => input.price = Some(PriceInput::Text(value)),
                "currency" => input.currency = Some(value),
                "image" => input.image = Some(value),
                "link" => input.link = Some(value),
                "owner" => input.owner = Some(value),
                "bought" => input.bought = Some(FlagInput::Text(value)),
                _ => {}
            }
        }

        Ok(Self { input, image })
    }
}

#[utoipa::path(
    get,
    path = "/api/items",
    responses((status = 200, body = [Wish]))
)]
pub async fn list_wishes(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Wish>>> {
    let wishes = state.wish_service.list_wishes()?;
    Ok(Json(wishes.into_iter().map(Wish::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = i32, Path, description = "Wish id")),
    responses(
        (status = 200, body = Wish),
        (status = 404, body = crate::error::ErrorBody)
    )
)]
pub async fn get_wish(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Wish>> {
    let id = parse_id(&id)?;
    let wish = state.wish_service.get_wish(id)?;
    Ok(Json(Wish::from(wish)))
}

#[utoipa::path(
    post,
    path = "/api/items",
    request_body = WishPayload,
    responses(
        (status = 201, body = Wish),
        (status = 400, body = crate::error::ErrorBody),
        (status = 401, body = crate::error::ErrorBody)
    )
)]
pub async fn create_wish(
    State(state): State<Arc<AppState>>,
    submission: WishSubmission,
) -> ApiResult<(StatusCode, Json<Wish>)> {
    let WishSubmission { mut input, image } = submission;

    let stored_image = match image {
        Some(upload) => {
            let url = state
                .uploads
                .save(upload.file_name.as_deref(), &upload.bytes)
                .await
                .map_err(|e| ApiError::Internal(format!("Failed to store image: {}", e)))?;
            input.image = Some(url.clone());
            Some(url)
        }
        None => None,
    };

    match state.wish_service.create_wish(input).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(Wish::from(created)))),
        Err(e) => {
            // The wish was rejected; its image is orphaned
            if let Some(url) = stored_image {
                state.uploads.discard(&url).await;
            }
            Err(e.into())
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = i32, Path, description = "Wish id")),
    request_body = WishPayload,
    responses(
        (status = 200, body = Wish),
        (status = 400, body = crate::error::ErrorBody),
        (status = 404, body = crate::error::ErrorBody)
    )
)]
pub async fn update_wish(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WishPayload>, JsonRejection>,
) -> ApiResult<Json<Wish>> {
    let id = parse_id(&id)?;
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let updated = state.wish_service.update_wish(id, payload.into()).await?;
    Ok(Json(Wish::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = i32, Path, description = "Wish id")),
    responses((status = 200, body = DeleteResponse))
)]
pub async fn delete_wish(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    let deleted = state.wish_service.delete_wish(id).await?;
    Ok(Json(DeleteResponse {
        deleted: deleted > 0,
    }))
}

/// Read-only item routes, open to everyone.
pub fn public_router() -> Router<Arc<AppState>> {
    ITEM_COLLECTIONS
        .iter()
        .fold(Router::new(), |router, collection| {
            router
                .route(&format!("/{}", collection), get(list_wishes))
                .route(&format!("/{}/{{id}}", collection), get(get_wish))
        })
}

/// Mutating item routes; the caller puts these behind the PIN check.
pub fn protected_router() -> Router<Arc<AppState>> {
    ITEM_COLLECTIONS
        .iter()
        .fold(Router::new(), |router, collection| {
            router.route(&format!("/{}", collection), post(create_wish)).route(
                &format!("/{}/{{id}}", collection),
                put(update_wish).patch(update_wish).delete(delete_wish),
            )
        })
}
