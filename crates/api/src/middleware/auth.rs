//! Authentication extractors.
//!
//! Provides the [`BearerToken`] extractor for pulling the opaque session
//! token out of the `Authorization` header. Handlers that need the calling
//! user resolve the token through `AuthService::authenticate`.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Extractor for the raw bearer token from `Authorization: Bearer <token>`.
///
/// Rejects with `401` if the header is missing or not in bearer form. The
/// token is NOT validated here; handlers pass it to
/// `AuthService::authenticate` (or `logout`), which owns expiry and purpose
/// checks.
///
/// # Example
///
/// ```rust,ignore
/// async fn whoami(
///     State(state): State<AppState>,
///     BearerToken(token): BearerToken,
/// ) -> Result<Json<UserResponse>> {
///     let (user, _session) = AuthService::new(state.pool()).authenticate(&token).await?;
///     Ok(Json(user.into()))
/// }
/// ```
pub struct BearerToken(pub String);

/// Rejection for a missing or malformed `Authorization` header.
pub struct BearerRejection;

impl IntoResponse for BearerRejection {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": "Missing or malformed Authorization header",
            "code": "MISSING_TOKEN",
        }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = BearerRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(BearerRejection)?;

        let token = header.strip_prefix("Bearer ").ok_or(BearerRejection)?;

        if token.is_empty() {
            return Err(BearerRejection);
        }

        Ok(Self(token.to_string()))
    }
}
