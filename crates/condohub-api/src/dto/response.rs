//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use condohub_auth::Claims;
use condohub_entity::user::{User, UserRole};

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Message.
    pub message: String,
    /// Session token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Message.
    pub message: String,
    /// The new identity.
    pub user: UserResponse,
}

/// A registered identity, without credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Apartment number.
    pub apartment: String,
    /// Building block.
    pub block: i16,
    /// Role.
    pub role: UserRole,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            apartment: user.apartment,
            block: user.block,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// The authenticated principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: UserRole,
    /// Token expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&Claims> for MeResponse {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name.clone(),
            role: claims.role,
            expires_at: claims.expires_at(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
