//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use polostore_core::{Email, UserId, UserRole};

/// A registered storefront user.
///
/// The password hash never leaves the database layer; responses built from
/// this type cannot leak it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Lowercase-normalized email address (unique).
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: UserRole,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated (password reset, role change).
    pub updated_at: DateTime<Utc>,
}
