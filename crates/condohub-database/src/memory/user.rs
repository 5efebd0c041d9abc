//! In-memory identity store using a Tokio mutex.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use condohub_core::error::AppError;
use condohub_core::result::AppResult;
use condohub_entity::user::{NaturalKey, NewUser, User};

use crate::store::IdentityStore;

/// Users plus both unique indices, guarded together.
#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<Uuid, User>,
    by_key: HashMap<NaturalKey, Uuid>,
    by_email: HashMap<String, Uuid>,
}

/// In-memory identity store.
///
/// One mutex covers the rows and both indices, so the uniqueness check and
/// the insert happen under the same lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryIdentityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.state.lock().await.users.len()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_natural_key(&self, key: &NaturalKey) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .by_key
            .get(key)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn insert_unique(&self, user: NewUser) -> AppResult<User> {
        let mut state = self.state.lock().await;

        let email = user.email.to_lowercase();
        if state.by_key.contains_key(&user.key) || state.by_email.contains_key(&email) {
            debug!(key = %user.key, "Rejecting duplicate registration");
            return Err(AppError::conflict("User already exists"));
        }

        let id = Uuid::new_v4();
        let key = user.key.clone();
        let created = user.into_user(id, Utc::now());

        state.by_key.insert(key, id);
        state.by_email.insert(email, id);
        state.users.insert(id, created.clone());

        Ok(created)
    }
}
