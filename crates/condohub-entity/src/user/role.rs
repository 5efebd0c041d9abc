//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles an identity can hold.
///
/// The set is closed: unknown values are rejected on every parse path
/// (serde, `FromStr`, and the Postgres enum type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Building administrator.
    Admin,
    /// Resident of an apartment.
    #[default]
    Resident,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Resident => "resident",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = condohub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "resident" => Ok(Self::Resident),
            _ => Err(condohub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, resident"
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("resident".parse::<UserRole>().unwrap(), UserRole::Resident);
        assert!("manager".parse::<UserRole>().is_err());
        assert!("".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_unknown_role_rejected_by_serde() {
        assert!(serde_json::from_str::<UserRole>("\"superuser\"").is_err());
        assert_eq!(
            serde_json::from_str::<UserRole>("\"resident\"").unwrap(),
            UserRole::Resident
        );
    }
}
