//! Store selection by configured provider.

use std::sync::Arc;

use tracing::{info, warn};

use condohub_core::config::{DatabaseConfig, StoreProvider};
use condohub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryIdentityStore, MemoryRevocationStore};
use crate::migration::run_migrations;
use crate::repositories::{RevokedTokenRepository, UserRepository};
use crate::store::{IdentityStore, RevocationStore};

/// The pair of stores the session authority runs against.
#[derive(Clone)]
pub struct Stores {
    /// Identity store.
    pub identities: Arc<dyn IdentityStore>,
    /// Revocation ledger store.
    pub revocations: Arc<dyn RevocationStore>,
    /// Underlying pool, when backed by PostgreSQL.
    pub pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("postgres", &self.pool.is_some())
            .finish()
    }
}

impl Stores {
    /// Build the stores for the configured provider, running migrations for
    /// PostgreSQL.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                run_migrations(pool.pool()).await?;
                Ok(Self {
                    identities: Arc::new(UserRepository::new(pool.pool().clone())),
                    revocations: Arc::new(RevokedTokenRepository::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
            StoreProvider::Memory => {
                warn!("Using in-memory stores; revocations are not shared across instances");
                Ok(Self::in_memory())
            }
        }
    }

    /// Fresh process-local stores.
    pub fn in_memory() -> Self {
        info!("Initialising in-memory identity and revocation stores");
        Self {
            identities: Arc::new(MemoryIdentityStore::new()),
            revocations: Arc::new(MemoryRevocationStore::new()),
            pool: None,
        }
    }

    /// Close the pool if there is one.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
