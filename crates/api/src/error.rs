//! Unified error handling.
//!
//! Provides a unified `AppError` type mapping service and repository errors
//! to HTTP responses. All route handlers should return `Result<T, AppError>`.
//! Responses carry a JSON body with a human-readable `error` message and a
//! stable machine-readable `code`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client, with a stable error code.
    #[error("Bad request: {message}")]
    Validation {
        code: &'static str,
        message: String,
    },
}

impl AppError {
    /// Shorthand for a `Validation` error.
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials
                | AuthError::InvalidSession
                | AuthError::SessionExpired
                | AuthError::InvalidResetToken
                | AuthError::ExpiredResetToken => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::WeakPassword(_) | AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Checkout(err) => match err {
                CheckoutError::MissingField(_)
                | CheckoutError::InvalidEmail(_)
                | CheckoutError::InvalidTotal
                | CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
                CheckoutError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                CheckoutError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => "NOT_FOUND",
                RepositoryError::Conflict(_) => "CONFLICT",
                RepositoryError::Database(_) => "INTERNAL_ERROR",
            },
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) => "INVALID_EMAIL",
                AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
                AuthError::UserAlreadyExists => "EMAIL_EXISTS",
                AuthError::WeakPassword(_) => "WEAK_PASSWORD",
                AuthError::InvalidSession => "INVALID_TOKEN",
                AuthError::SessionExpired => "TOKEN_EXPIRED",
                AuthError::InvalidResetToken => "INVALID_RESET_TOKEN",
                AuthError::ExpiredResetToken => "EXPIRED_RESET_TOKEN",
                AuthError::Repository(_) | AuthError::PasswordHash => "INTERNAL_ERROR",
            },
            Self::Checkout(err) => match err {
                CheckoutError::MissingField(_) => "MISSING_REQUIRED_FIELD",
                CheckoutError::InvalidEmail(_) => "INVALID_EMAIL",
                CheckoutError::InvalidTotal => "INVALID_TOTAL",
                CheckoutError::EmptyCart => "EMPTY_CART",
                CheckoutError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
                CheckoutError::Repository(_) => "INTERNAL_ERROR",
            },
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation { code, .. } => code,
        }
    }

    /// Client-facing message. Internal details stay out of responses.
    fn message(&self) -> String {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => "Resource not found".to_string(),
                RepositoryError::Conflict(msg) => msg.clone(),
                RepositoryError::Database(_) => "Internal server error".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_string()
                }
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::InvalidSession => "Invalid session token".to_string(),
                AuthError::SessionExpired => "Session expired".to_string(),
                AuthError::InvalidResetToken => "Invalid reset token".to_string(),
                AuthError::ExpiredResetToken => "Reset token expired".to_string(),
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    "Internal server error".to_string()
                }
            },
            Self::Checkout(err) => match err {
                CheckoutError::Repository(_) => "Internal server error".to_string(),
                other => other.to_string(),
            },
            Self::NotFound(what) => format!("{what} not found"),
            Self::Validation { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request error");
        }

        let body = Json(json!({
            "error": self.message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product".to_string());
        assert_eq!(err.to_string(), "Not found: product");

        let err = AppError::validation("INVALID_SORT_FIELD", "unknown sort field");
        assert_eq!(err.to_string(), "Bad request: unknown sort field");
    }

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::WeakPassword("too short".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::SessionExpired)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_checkout_error_status_codes() {
        assert_eq!(
            status_of(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Checkout(CheckoutError::ProductNotFound(
                42.into()
            ))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_repository_error_status_codes() {
        assert_eq!(
            status_of(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Database(RepositoryError::Conflict(
                "slug taken".into()
            ))),
            StatusCode::CONFLICT
        );
    }
}
