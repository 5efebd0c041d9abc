//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::natural_key::NaturalKey;
use super::role::UserRole;

/// A registered resident or administrator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier (the `sub` claim of issued tokens).
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address, stored lower-cased.
    pub email: String,
    /// Argon2 password hash in PHC string format.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Apartment number.
    pub apartment: String,
    /// Building block.
    pub block: i16,
    /// Role embedded in issued tokens.
    pub role: UserRole,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns the apartment + block key of this user.
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(&self.apartment, self.block)
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user. The password is already hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Apartment + block.
    pub key: NaturalKey,
    /// Assigned role.
    pub role: UserRole,
}

impl NewUser {
    /// Materialises the row the store will persist.
    pub fn into_user(self, id: Uuid, created_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            apartment: self.key.apartment,
            block: self.key.block,
            role: self.role,
            created_at,
        }
    }
}
