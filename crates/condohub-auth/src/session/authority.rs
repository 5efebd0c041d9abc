//! Session authority: register, login, logout, authenticate.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use condohub_core::config::AuthConfig;
use condohub_core::error::AppError;
use condohub_database::IdentityStore;
use condohub_entity::user::{NaturalKey, NewUser, User, UserRole};

use crate::deadline::bounded;
use crate::error::AuthError;
use crate::jwt::{Claims, IdentityClaims, IssuedToken, TokenCodec};
use crate::password::{CredentialHasher, PasswordPolicy};
use crate::revocation::RevocationLedger;

use super::model::{Credentials, Registration};
use super::verdict::TokenVerdict;

/// Blocks a resident may live in.
const VALID_BLOCKS: [i16; 2] = [1, 2];

/// The component every caller talks to.
///
/// Cheap to clone; all operations are safe to run concurrently without
/// external locking.
#[derive(Clone)]
pub struct SessionAuthority {
    /// Token codec holding the signing key.
    codec: Arc<TokenCodec>,
    /// Credential hasher.
    hasher: CredentialHasher,
    /// Password policy for registration.
    policy: PasswordPolicy,
    /// Revocation ledger.
    ledger: RevocationLedger,
    /// Identity store.
    identities: Arc<dyn IdentityStore>,
    /// Bound on identity store calls.
    store_timeout: Duration,
}

impl std::fmt::Debug for SessionAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthority")
            .field("codec", &self.codec)
            .field("ledger", &self.ledger)
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

impl SessionAuthority {
    /// Creates a session authority from its collaborators.
    pub fn new(
        config: &AuthConfig,
        codec: Arc<TokenCodec>,
        ledger: RevocationLedger,
        identities: Arc<dyn IdentityStore>,
        store_timeout: Duration,
    ) -> Result<Self, AppError> {
        Ok(Self {
            codec,
            hasher: CredentialHasher::new(config)?,
            policy: PasswordPolicy::new(config),
            ledger,
            identities,
            store_timeout,
        })
    }

    /// The token codec in use.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Registers a new identity.
    ///
    /// Requesting the admin role requires `caller` to be an authenticated
    /// admin. Uniqueness of email and natural key is enforced by the store in
    /// the same step as the insert.
    pub async fn register(
        &self,
        registration: Registration,
        caller: Option<&Claims>,
    ) -> Result<User, AuthError> {
        let role = registration.role.unwrap_or_default();
        if role == UserRole::Admin && !caller.is_some_and(Claims::is_admin) {
            warn!(
                caller = ?caller.map(Claims::user_id),
                "Admin registration attempted without admin token"
            );
            return Err(AuthError::Forbidden(
                "Only administrators can register administrators".to_string(),
            ));
        }

        let key = NaturalKey::new(&registration.apartment, registration.block);
        if key.apartment.is_empty() {
            return Err(AuthError::Validation("Apartment is required".to_string()));
        }
        if !VALID_BLOCKS.contains(&key.block) {
            return Err(AuthError::Validation("Block must be 1 or 2".to_string()));
        }
        self.policy.validate(&registration.password)?;

        let password_hash = self.hash_off_thread(registration.password).await?;

        let new_user = NewUser {
            name: registration.name.trim().to_string(),
            email: registration.email.trim().to_lowercase(),
            password_hash,
            key,
            role,
        };

        let user = bounded(
            self.store_timeout,
            "insert_unique",
            self.identities.insert_unique(new_user),
        )
        .await?;

        info!(
            user_id = %user.id,
            apartment = %user.apartment,
            block = user.block,
            role = %user.role,
            "User registered"
        );
        Ok(user)
    }

    /// Exchanges a natural key and password for a session token.
    ///
    /// An unknown natural key and a wrong password produce the same error,
    /// after the same amount of hashing work.
    pub async fn login(&self, credentials: Credentials) -> Result<IssuedToken, AuthError> {
        let key = credentials.natural_key();

        let found = bounded(
            self.store_timeout,
            "find_by_natural_key",
            self.identities.find_by_natural_key(&key),
        )
        .await?;

        let digest = found
            .as_ref()
            .map(|user| user.password_hash.clone())
            .unwrap_or_else(|| self.hasher.dummy_digest().to_string());

        let matches = self.verify_off_thread(credentials.password, digest).await?;

        let user = match found {
            Some(user) if matches => user,
            _ => {
                debug!(apartment = %key.apartment, block = key.block, "Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let issued = self.codec.issue_default(&IdentityClaims::from(&user))?;
        info!(user_id = %user.id, "Login successful");
        Ok(issued)
    }

    /// Revokes a token. The token must verify; an already revoked token
    /// revokes again as a no-op.
    ///
    /// The ledger write runs on its own task, so once started it completes
    /// even if the caller goes away.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.codec.verify_and_decode(token)?;
        let expires_at = self.codec.decode_expiry_only(token)?;
        let token_id = TokenCodec::fingerprint(token);

        let ledger = self.ledger.clone();
        let write_id = token_id.clone();
        tokio::spawn(async move { ledger.revoke(&write_id, expires_at).await })
            .await
            .map_err(|e| AuthError::Internal(format!("Revocation task failed: {e}")))??;

        info!(user_id = %claims.sub, token_id = %token_id, "Logout successful");
        Ok(())
    }

    /// Classifies a token. Only a store failure is an `Err`.
    pub async fn inspect(&self, token: &str) -> Result<TokenVerdict, AuthError> {
        let claims = match self.codec.verify_and_decode(token) {
            Ok(claims) => claims,
            Err(AuthError::TokenExpired) => return Ok(TokenVerdict::Expired),
            Err(_) => return Ok(TokenVerdict::Malformed),
        };

        let token_id = TokenCodec::fingerprint(token);
        if self.ledger.is_revoked(&token_id).await? {
            return Ok(TokenVerdict::Revoked);
        }

        Ok(TokenVerdict::Valid(claims))
    }

    /// Returns the claims of a valid, unrevoked token.
    pub async fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        self.inspect(token).await?.into_result()
    }

    async fn hash_off_thread(&self, secret: String) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))?
    }

    async fn verify_off_thread(&self, secret: String, digest: String) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&secret, &digest))
            .await
            .map_err(|e| AuthError::Internal(format!("Verification task failed: {e}")))
    }
}
