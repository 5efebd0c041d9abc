//! Revoked token row and the identifier it is keyed by.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Derived identifier of a session token.
///
/// Lowercase hex SHA-256 of the compact token string, so the ledger never
/// stores a usable bearer credential. Computed by the token codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenFingerprint(String);

impl TokenFingerprint {
    /// Wraps an already-computed fingerprint.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Returns the hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entry in the revocation ledger.
///
/// Presence means revoked, regardless of expiry. Once `expiration_date`
/// passes the row is dead weight and may be purged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RevokedToken {
    /// Fingerprint of the revoked token.
    pub token_id: String,
    /// Expiry of the revoked token.
    pub expiration_date: DateTime<Utc>,
    /// When the revocation was recorded.
    pub revoked_at: DateTime<Utc>,
}

impl RevokedToken {
    /// Whether the underlying token would be rejected by expiry anyway.
    pub fn is_dead(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date < now
    }
}
