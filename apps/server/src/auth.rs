use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::ApiError, main_lib::AppState};

#[derive(Serialize, ToSchema)]
pub struct AuthStatusResponse {
    pub requires_pin: bool,
    pub pin_header: String,
}

/// Finds the PIN in the canonical header, falling back to each alias in order.
/// Empty values are skipped.
pub fn supplied_pin<'a>(
    headers: &'a HeaderMap,
    header: &str,
    aliases: &[String],
) -> Option<&'a str> {
    std::iter::once(header)
        .chain(aliases.iter().map(String::as_str))
        .find_map(|name| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
        })
}

#[utoipa::path(
    get,
    path = "/api/auth/status",
    responses((status = 200, body = AuthStatusResponse))
)]
pub async fn auth_status(State(state): State<Arc<AppState>>) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        requires_pin: state.pin_guard.is_enabled(),
        pin_header: state.pin_header.clone(),
    })
}

/// Rejects mutating requests that do not carry the household PIN.
pub async fn require_pin(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let pin = supplied_pin(
        request.headers(),
        &state.pin_header,
        &state.pin_header_aliases,
    );
    if let Err(e) = state.pin_guard.check(pin) {
        tracing::warn!(
            "Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            e
        );
        return Err(e.into());
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_canonical_header_wins_over_alias() {
        let mut headers = HeaderMap::new();
        headers.insert("x-pin", HeaderValue::from_static("alias"));
        headers.insert("x-auth-pin", HeaderValue::from_static("canonical"));
        let aliases = vec!["x-pin".to_string()];
        assert_eq!(supplied_pin(&headers, "x-auth-pin", &aliases), Some("canonical"));
    }

    #[test]
    fn test_empty_canonical_header_falls_through_to_alias() {
        let mut headers = HeaderMap::new();
        headers.insert("x-auth-pin", HeaderValue::from_static(""));
        headers.insert("x-pin", HeaderValue::from_static("2468"));
        let aliases = vec!["x-pin".to_string()];
        assert_eq!(supplied_pin(&headers, "x-auth-pin", &aliases), Some("2468"));

        headers.remove("x-pin");
        assert_eq!(supplied_pin(&headers, "x-auth-pin", &aliases), None);
    }

    #[test]
    fn test_alias_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-pin", HeaderValue::from_static("1234"));
        let aliases = vec!["x-pin".to_string()];
        assert_eq!(supplied_pin(&headers, "x-auth-pin", &aliases), Some("1234"));
        assert_eq!(supplied_pin(&headers, "x-auth-pin", &[]), None);
    }
}
