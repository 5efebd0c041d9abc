//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use condohub_core::error::{AppError, ErrorKind};
use condohub_core::result::AppResult;
use condohub_entity::user::{NaturalKey, NewUser, User};

use crate::store::IdentityStore;

/// Repository for user lookups and registration.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_natural_key(&self, key: &NaturalKey) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE apartment = $1 AND block = $2")
            .bind(&key.apartment)
            .bind(key.block)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by apartment", e)
            })
    }

    async fn insert_unique(&self, user: NewUser) -> AppResult<User> {
        let key = user.key.clone();

        // The table's unique constraints make check-and-insert a single step.
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash, apartment, block, role, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.key.apartment)
        .bind(user.key.block)
        .bind(user.role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("User already exists")
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_apartment_block_key") =>
            {
                tracing::debug!(apartment = %key.apartment, block = key.block, "Natural key taken");
                AppError::conflict("User already exists")
            }
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict("User already exists")
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to create user", other),
        })
    }
}
