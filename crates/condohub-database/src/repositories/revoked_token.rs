//! Revocation ledger repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use condohub_core::error::{AppError, ErrorKind};
use condohub_core::result::AppResult;
use condohub_entity::revocation::TokenFingerprint;

use crate::store::RevocationStore;

/// Repository for the `revoked_tokens` table.
#[derive(Debug, Clone)]
pub struct RevokedTokenRepository {
    pool: PgPool,
}

impl RevokedTokenRepository {
    /// Create a new revoked token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationStore for RevokedTokenRepository {
    async fn insert_if_absent(
        &self,
        token_id: &TokenFingerprint,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO revoked_tokens (token_id, expiration_date, revoked_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (token_id) DO NOTHING",
        )
        .bind(token_id.as_str())
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn contains(&self, token_id: &TokenFingerprint) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token_id = $1)",
        )
        .bind(token_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check revoked token", e)
        })
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expiration_date < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge revoked tokens", e)
            })?;

        Ok(result.rows_affected())
    }
}
