//! User roles.

use serde::{Deserialize, Serialize};

/// Role assigned to a user account.
///
/// Stored as lowercase text in the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular shopper account.
    #[default]
    User,
    /// Full access to the admin dashboard.
    Admin,
    /// Store management without user administration.
    Manager,
    /// Read access for customer support.
    Support,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Support => write!(f, "support"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "support" => Ok(Self::Support),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_role() {
        assert_eq!(UserRole::default(), UserRole::User);
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for role in [
            UserRole::User,
            UserRole::Admin,
            UserRole::Manager,
            UserRole::Support,
        ] {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
