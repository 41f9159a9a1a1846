//! Authentication route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::middleware::BearerToken;
use crate::models::{Session, User};
use crate::services::AuthService;
use crate::state::AppState;

/// Create the auth routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}

// Request fields default to empty so a missing field surfaces as a stable
// 400 validation code instead of a deserialization rejection.

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response for a successful login: the user plus the bearer credential.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Response for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
    pub session: Session,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub password: String,
}

fn require(value: &str, code: &'static str, message: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(code, message));
    }
    Ok(())
}

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    require(&body.email, "MISSING_EMAIL", "Email is required")?;
    require(&body.password, "MISSING_PASSWORD", "Password is required")?;
    require(&body.name, "MISSING_NAME", "Name is required")?;

    let auth = AuthService::new(state.pool());
    let user = auth
        .register(&body.email, &body.password, body.name.trim(), None)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    require(&body.email, "MISSING_EMAIL", "Email is required")?;
    require(&body.password, "MISSING_PASSWORD", "Password is required")?;

    let auth = AuthService::new(state.pool());
    let (user, session) = auth.login(&body.email, &body.password).await?;

    Ok(Json(LoginResponse {
        user,
        token: session.token,
        expires_at: session.expires_at,
    }))
}

/// `POST /auth/logout`
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>> {
    let auth = AuthService::new(state.pool());
    auth.logout(&token).await?;

    Ok(Json(json!({ "message": "Logged out" })))
}

/// `GET /auth/me`
pub async fn me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<MeResponse>> {
    let auth = AuthService::new(state.pool());
    let (user, session) = auth.authenticate(&token).await?;

    Ok(Json(MeResponse { user, session }))
}

/// `POST /auth/forgot-password`
///
/// Always answers with the same generic message; whether the email has an
/// account is not observable from the response. The minted token reaches the
/// user out of band (mail delivery is outside this service).
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>> {
    require(&body.email, "MISSING_EMAIL", "Email is required")?;

    let auth = AuthService::new(state.pool());

    if let Some(session) = auth.request_password_reset(&body.email).await? {
        tracing::info!(user_id = %session.user_id, "Password reset token issued");
    }

    Ok(Json(json!({
        "message": "If an account with that email exists, a reset link has been sent"
    })))
}

/// `POST /auth/reset-password`
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<Value>> {
    require(&body.token, "MISSING_RESET_TOKEN", "Reset token is required")?;
    require(&body.password, "MISSING_PASSWORD", "Password is required")?;

    let auth = AuthService::new(state.pool());
    auth.complete_password_reset(&body.token, &body.password)
        .await?;

    Ok(Json(json!({ "message": "Password reset successful" })))
}
