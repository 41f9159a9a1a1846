//! Session repository for database operations.
//!
//! Sessions are bearer credentials; rows past their `expires_at` are dead
//! weight and get deleted either lazily (when a read trips over them) or by
//! the periodic sweep. Every read path still re-checks expiry, so the sweep
//! is hygiene, not correctness.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use polostore_core::{SessionPurpose, UserId};

use super::RepositoryError;
use crate::models::Session;

/// Repository for session database operations.
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new session row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        token: &str,
        purpose: SessionPurpose,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, RepositoryError> {
        let session = sqlx::query_as::<_, Session>(
            r"
            INSERT INTO sessions (user_id, token, purpose, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, user_id, token, purpose, expires_at, created_at
            ",
        )
        .bind(user_id)
        .bind(token)
        .bind(purpose)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }

    /// Look up a session by its token, regardless of purpose or expiry.
    ///
    /// Callers are responsible for checking `purpose` and `expires_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<Session>, RepositoryError> {
        let session = sqlx::query_as::<_, Session>(
            r"
            SELECT id, user_id, token, purpose, expires_at, created_at
            FROM sessions
            WHERE token = ?
            ",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Delete a session by token.
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_by_token(&self, token: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every session whose expiry has passed.
    ///
    /// Returns the number of rows swept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
