use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth::{self, AuthStatusResponse},
    config::Config,
    error::{ApiError, ApiResult, ErrorBody},
    main_lib::AppState,
    models::{DeleteResponse, RestoreResponse, UploadResponse, Wish, WishPayload},
};

pub mod files;
pub mod interchange;
pub mod wishes;

/// Both collection names are served; older clients use `wishes`.
pub const ITEM_COLLECTIONS: [&str; 2] = ["items", "wishes"];

#[utoipa::path(get, path = "/api/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

/// Path ids must be integers; anything else is a 400 with the usual error body.
pub(crate) fn parse_id(raw: &str) -> ApiResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", raw)))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        auth::auth_status,
        wishes::list_wishes,
        wishes::get_wish,
        wishes::create_wish,
        wishes::update_wish,
        wishes::delete_wish,
        files::upload_file,
        interchange::export_csv,
        interchange::restore_csv,
        interchange::backup_sqlite,
    ),
    components(schemas(
        Wish,
        WishPayload,
        DeleteResponse,
        UploadResponse,
        RestoreResponse,
        AuthStatusResponse,
        ErrorBody
    )),
    tags((name = "wishlist"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let openapi = ApiDoc::openapi();

    let public = Router::new()
        .route("/healthz", get(healthz))
        .route("/auth/status", get(auth::auth_status))
        .merge(wishes::public_router());

    let protected = Router::new()
        .merge(wishes::protected_router())
        .merge(files::router())
        .merge(interchange::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_pin,
        ));

    let api = public.merge(protected);

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(state.uploads.dir()))
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_id("1.5"), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_openapi_lists_item_routes() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["paths"]["/api/items"].is_object());
        assert!(json["paths"]["/api/items/{id}"].is_object());
        assert!(json["paths"]["/api/backup/sqlite"].is_object());
    }
}
