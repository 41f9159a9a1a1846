//! Session domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use polostore_core::{SessionId, SessionPurpose, UserId};

/// A persisted bearer-token credential.
///
/// Carries both login sessions and one-time password-reset tokens,
/// distinguished by [`SessionPurpose`]. A session is live until its
/// `expires_at` passes; expiry is re-checked on every use, not only by the
/// background sweep.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session ID.
    pub id: SessionId,
    /// Owning user.
    pub user_id: UserId,
    /// Opaque random token (unique).
    pub token: String,
    /// What this row grants: API access or a single password reset.
    pub purpose: SessionPurpose,
    /// Absolute expiry stamped at creation; never renewed in place.
    pub expires_at: DateTime<Utc>,
    /// When the session was issued.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry timestamp.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
