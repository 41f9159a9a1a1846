//! Authentication service.
//!
//! Handles registration, password login, bearer-session issuance and
//! inspection, and the one-time password-reset flow. Expired sessions are
//! evicted lazily: `login` and `authenticate` sweep the whole table before
//! doing their own work, and any individual expired row encountered is
//! deleted on detection.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use polostore_core::{Email, SessionPurpose, UserRole};

use crate::db::RepositoryError;
use crate::db::sessions::SessionRepository;
use crate::db::users::UserRepository;
use crate::models::{Session, User};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    sessions: SessionRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
            sessions: SessionRepository::new(pool),
        }
    }

    /// Register a new user with email, password, and display name.
    ///
    /// The stored email is lowercase-normalized; uniqueness is therefore
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Option<UserRole>,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&email, &password_hash, name, role.unwrap_or_default())
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password, issuing a fresh 7-day bearer session.
    ///
    /// Sweeps all globally expired sessions first. Unknown email and wrong
    /// password both return the same error, by design.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, Session), AuthError> {
        let email = Email::parse(email)?;

        self.sessions.delete_expired(Utc::now()).await?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let session = self.issue_session(&user, SessionPurpose::Login).await?;

        Ok((user, session))
    }

    /// Delete the session matching a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSession` if no such session exists.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let deleted = self.sessions.delete_by_token(token).await?;

        if !deleted {
            return Err(AuthError::InvalidSession);
        }

        Ok(())
    }

    /// Resolve a bearer token to its session and owning user.
    ///
    /// Sweeps expired sessions, then re-checks expiry on the looked-up row;
    /// an expired match is deleted before the error is returned, so the
    /// token is unusable on any subsequent call.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSession` if the token is unknown or not a
    /// login token.
    /// Returns `AuthError::SessionExpired` if the token's expiry has passed.
    pub async fn authenticate(&self, token: &str) -> Result<(User, Session), AuthError> {
        let now = Utc::now();
        self.sessions.delete_expired(now).await?;

        let session = self
            .sessions
            .get_by_token(token)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        if session.purpose != SessionPurpose::Login {
            return Err(AuthError::InvalidSession);
        }

        // Checked again after lookup; the sweep and this read race against
        // the clock, not each other.
        if session.is_expired(now) {
            self.sessions.delete_by_token(token).await?;
            return Err(AuthError::SessionExpired);
        }

        let user = self
            .users
            .get_by_id(session.user_id)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        Ok((user, session))
    }

    /// Mint a one-time password-reset token if the email has an account.
    ///
    /// Returns `Ok(None)` for unknown emails; the route layer answers with
    /// the same generic message either way, so callers cannot enumerate
    /// accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<Session>, AuthError> {
        let email = Email::parse(email)?;

        let Some(user) = self.users.get_by_email(&email).await? else {
            return Ok(None);
        };

        let session = self
            .issue_session(&user, SessionPurpose::PasswordReset)
            .await?;

        Ok(Some(session))
    }

    /// Consume a password-reset token and set a new password.
    ///
    /// The token is single-use: it is deleted whether it was expired (on
    /// detection) or successfully consumed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidResetToken` if the token is unknown or not
    /// a reset token.
    /// Returns `AuthError::ExpiredResetToken` if its expiry has passed.
    /// Returns `AuthError::WeakPassword` if the new password is too weak.
    pub async fn complete_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let session = self
            .sessions
            .get_by_token(token)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        if session.purpose != SessionPurpose::PasswordReset {
            return Err(AuthError::InvalidResetToken);
        }

        if session.is_expired(Utc::now()) {
            self.sessions.delete_by_token(token).await?;
            return Err(AuthError::ExpiredResetToken);
        }

        validate_password(new_password)?;

        let password_hash = hash_password(new_password)?;
        self.users
            .update_password(session.user_id, &password_hash)
            .await?;

        // Single-use contract: no replay with the same token.
        self.sessions.delete_by_token(token).await?;

        Ok(())
    }

    /// Delete every expired session row. Used by the periodic sweeper.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the delete fails.
    pub async fn sweep_expired(&self) -> Result<u64, AuthError> {
        let swept = self.sessions.delete_expired(Utc::now()).await?;
        Ok(swept)
    }

    /// Issue a session with a random opaque token and purpose-driven expiry.
    async fn issue_session(
        &self,
        user: &User,
        purpose: SessionPurpose,
    ) -> Result<Session, AuthError> {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + purpose.ttl();

        let session = self
            .sessions
            .create(user.id, &token, purpose, expires_at)
            .await?;

        Ok(session)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash (constant-time comparison via argon2).
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_rejects_short() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("password123").is_ok());
    }

    #[test]
    fn test_hash_password_is_not_plaintext() {
        let hash = hash_password("password123").unwrap();
        assert_ne!(hash, "password123");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = hash_password("password123").unwrap();
        assert!(verify_password("password123", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong-password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("password123", "not-a-hash"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
