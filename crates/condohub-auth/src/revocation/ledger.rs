//! Durable set of revoked token fingerprints.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use condohub_database::RevocationStore;
use condohub_entity::revocation::TokenFingerprint;

use crate::deadline::bounded;
use crate::error::AuthError;

/// Revocation ledger over a [`RevocationStore`].
///
/// Linearizability per fingerprint is the store's job: `revoke` returns only
/// after the store acknowledged the write, and `is_revoked` always asks the
/// store. Nothing is cached here.
#[derive(Clone)]
pub struct RevocationLedger {
    store: Arc<dyn RevocationStore>,
    timeout: Duration,
}

impl std::fmt::Debug for RevocationLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationLedger")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RevocationLedger {
    /// Creates a ledger whose store calls are bounded by `timeout`.
    pub fn new(store: Arc<dyn RevocationStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Records a revocation. Revoking twice is a successful no-op.
    pub async fn revoke(
        &self,
        token_id: &TokenFingerprint,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let inserted = bounded(
            self.timeout,
            "revoke",
            self.store.insert_if_absent(token_id, expires_at),
        )
        .await?;

        if inserted {
            info!(token_id = %token_id, expires_at = %expires_at, "Token revoked");
        } else {
            debug!(token_id = %token_id, "Token already revoked");
        }
        Ok(())
    }

    /// Point-in-time membership check. A store failure is an error, never
    /// "not revoked".
    pub async fn is_revoked(&self, token_id: &TokenFingerprint) -> Result<bool, AuthError> {
        bounded(self.timeout, "is_revoked", self.store.contains(token_id)).await
    }

    /// Removes entries whose expiry has passed.
    pub async fn purge_expired(&self) -> Result<u64, AuthError> {
        bounded(
            self.timeout,
            "purge_expired",
            self.store.delete_expired(Utc::now()),
        )
        .await
    }
}
