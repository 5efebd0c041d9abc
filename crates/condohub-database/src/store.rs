//! Store traits consumed by the session authority.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use condohub_core::result::AppResult;
use condohub_entity::revocation::TokenFingerprint;
use condohub_entity::user::{NaturalKey, NewUser, User};

/// Durable home of registered identities.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Look an identity up by apartment + block.
    async fn find_by_natural_key(&self, key: &NaturalKey) -> AppResult<Option<User>>;

    /// Insert a new identity.
    ///
    /// Must fail with [`condohub_core::ErrorKind::Conflict`] when the email or
    /// the natural key is already taken. The uniqueness check and the insert
    /// are a single atomic step: two concurrent calls with the same key can
    /// never both succeed.
    async fn insert_unique(&self, user: NewUser) -> AppResult<User>;
}

/// Durable set of revoked token fingerprints.
///
/// A record's presence means revoked, regardless of its expiry.
#[async_trait]
pub trait RevocationStore: Send + Sync + 'static {
    /// Record a revocation. Returns `false` if the fingerprint was already
    /// present, which callers treat as success.
    async fn insert_if_absent(
        &self,
        token_id: &TokenFingerprint,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Point-in-time membership check.
    async fn contains(&self, token_id: &TokenFingerprint) -> AppResult<bool>;

    /// Remove entries whose expiry is strictly before `now`.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
