//! In-memory revocation ledger backed by a `DashMap`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use condohub_core::result::AppResult;
use condohub_entity::revocation::{RevokedToken, TokenFingerprint};

use crate::store::RevocationStore;

/// In-memory revocation ledger keyed by token fingerprint.
#[derive(Debug, Clone, Default)]
pub struct MemoryRevocationStore {
    entries: Arc<DashMap<TokenFingerprint, RevokedToken>>,
}

impl MemoryRevocationStore {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn insert_if_absent(
        &self,
        token_id: &TokenFingerprint,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        match self.entries.entry(token_id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(RevokedToken {
                    token_id: token_id.as_str().to_string(),
                    expiration_date: expires_at,
                    revoked_at: Utc::now(),
                });
                Ok(true)
            }
        }
    }

    async fn contains(&self, token_id: &TokenFingerprint) -> AppResult<bool> {
        Ok(self.entries.contains_key(token_id))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_dead(now));
        Ok(before.saturating_sub(self.entries.len()) as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fp(s: &str) -> TokenFingerprint {
        TokenFingerprint::from_hex(s)
    }

    #[tokio::test]
    async fn test_insert_is_idempotent() {
        let store = MemoryRevocationStore::new();
        let exp = Utc::now() + Duration::minutes(30);

        assert!(store.insert_if_absent(&fp("aa"), exp).await.unwrap());
        assert!(!store.insert_if_absent(&fp("aa"), exp).await.unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.contains(&fp("aa")).await.unwrap());
        assert!(!store.contains(&fp("bb")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_expired_keeps_live_entries() {
        let store = MemoryRevocationStore::new();
        let now = Utc::now();

        store
            .insert_if_absent(&fp("old"), now - Duration::minutes(1))
            .await
            .unwrap();
        store
            .insert_if_absent(&fp("edge"), now)
            .await
            .unwrap();
        store
            .insert_if_absent(&fp("live"), now + Duration::minutes(1))
            .await
            .unwrap();

        assert_eq!(store.delete_expired(now).await.unwrap(), 1);
        assert!(!store.contains(&fp("old")).await.unwrap());
        assert!(store.contains(&fp("edge")).await.unwrap());
        assert!(store.contains(&fp("live")).await.unwrap());
    }
}
