//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] polostore_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    ///
    /// Deliberately covers both cases so a caller cannot probe which emails
    /// have accounts.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Bearer token missing, malformed, or unknown.
    #[error("invalid session token")]
    InvalidSession,

    /// Bearer token known but past its expiry (deleted on detection).
    #[error("session expired")]
    SessionExpired,

    /// Password-reset token unknown or not a reset token.
    #[error("invalid reset token")]
    InvalidResetToken,

    /// Password-reset token past its expiry (deleted on detection).
    #[error("reset token expired")]
    ExpiredResetToken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
