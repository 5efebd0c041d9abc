//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use condohub_core::config::AuthConfig;
use condohub_core::error::AppError;

use crate::error::AuthError;

/// Plaintext behind the dummy digest used when a login names no identity.
const DUMMY_SECRET: &str = "condohub-no-such-identity";

/// Hashes and verifies credentials with Argon2id.
///
/// Cost parameters come from configuration and are embedded in each digest,
/// so digests made under older parameters still verify.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
    /// Digest of [`DUMMY_SECRET`] under the current parameters.
    dummy_digest: String,
}

impl CredentialHasher {
    /// Creates a hasher from auth configuration.
    ///
    /// Fails when the cost parameters are out of Argon2's accepted range.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        let mut hasher = Self {
            params,
            dummy_digest: String::new(),
        };
        hasher.dummy_digest = hasher
            .hash(DUMMY_SECRET)
            .map_err(|e| AppError::internal(e.to_string()))?;
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext secret with a fresh random salt.
    pub fn hash(&self, secret: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext secret against a stored digest.
    ///
    /// A malformed digest or any verification error yields `false`.
    pub fn verify(&self, secret: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        self.argon2()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }

    /// A valid digest no real secret matches in practice, for verifying
    /// against when the identity does not exist.
    pub fn dummy_digest(&self) -> &str {
        &self.dummy_digest
    }
}
