//! Claims carried by session tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use condohub_entity::user::{User, UserRole};

/// The identity part of a token: who, what they are called, and their role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Identity id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Role at the time of issuance.
    pub role: UserRole,
}

impl From<&User> for IdentityClaims {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Signed token payload.
///
/// Every field is required; `role` only accepts the known role names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity id.
    pub sub: Uuid,
    /// Display name.
    pub name: String,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiry (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Whether the subject is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The identity claims without timestamps.
    pub fn identity(&self) -> IdentityClaims {
        IdentityClaims {
            id: self.sub,
            name: self.name.clone(),
            role: self.role,
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
