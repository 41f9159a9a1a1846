//! Status enums for orders and sessions.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders start as `Pending`. The allowed transitions are
/// `Pending -> Completed` and `Pending -> Cancelled`; both `Completed` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status may move to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Completed | Self::Cancelled),
            Self::Completed | Self::Cancelled => false,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// What a session row represents.
///
/// Login sessions and one-time password-reset tokens share the `sessions`
/// table; the purpose tag is what tells them apart and drives the expiry
/// policy. A reset token can never be used as a bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum SessionPurpose {
    /// Bearer-token login session (7 day expiry).
    Login,
    /// One-time password-reset token (1 hour expiry).
    PasswordReset,
}

impl SessionPurpose {
    /// Lifetime stamped onto a new session of this purpose.
    #[must_use]
    pub const fn ttl(self) -> chrono::Duration {
        match self {
            Self::Login => chrono::Duration::days(7),
            Self::PasswordReset => chrono::Duration::hours(1),
        }
    }
}

impl std::fmt::Display for SessionPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::PasswordReset => write!(f, "password_reset"),
        }
    }
}
