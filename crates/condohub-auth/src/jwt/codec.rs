//! HS256 token codec.
//!
//! `verify_and_decode` is the only path whose output may be trusted for an
//! authorization decision. `decode_expiry_only` skips the signature and
//! exists for ledger bookkeeping at logout.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use condohub_core::config::{AuthConfig, MAX_TOKEN_TTL_MINUTES};
use condohub_core::error::AppError;
use condohub_entity::revocation::TokenFingerprint;

use super::claims::{Claims, IdentityClaims};
use crate::error::AuthError;

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IssuedToken {
    /// Compact, URL-safe token string.
    pub token: String,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ExpiryOnly {
    exp: i64,
}

/// Signs, verifies and decodes session tokens.
///
/// The signing key is fixed at construction and never changes afterwards.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_validation: Validation,
    default_ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    ///
    /// An empty signing key or a TTL outside `1..=MAX_TOKEN_TTL_MINUTES` is a
    /// configuration error.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must be set"));
        }
        let default_ttl = ttl_from_minutes(config.token_ttl_minutes)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let mut expiry_validation = Validation::new(Algorithm::HS256);
        expiry_validation.insecure_disable_signature_validation();
        expiry_validation.validate_exp = false;
        expiry_validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            expiry_validation,
            default_ttl,
        })
    }

    /// TTL applied by [`Self::issue_default`].
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Signs `claims` with `iat = now` and `exp = now + ttl`.
    ///
    /// A negative `ttl` yields an already-expired token. A `ttl` that
    /// overflows the calendar is an internal error.
    pub fn issue(&self, claims: &IdentityClaims, ttl: Duration) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal(format!("Token TTL out of range: {ttl}")))?;

        let payload = Claims {
            sub: claims.id,
            name: claims.name.clone(),
            role: claims.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Signs `claims` with the configured TTL.
    pub fn issue_default(&self, claims: &IdentityClaims) -> Result<IssuedToken, AuthError> {
        self.issue(claims, self.default_ttl)
    }

    /// Verifies signature and expiry and returns the claims.
    ///
    /// Expired (with a valid signature) maps to [`AuthError::TokenExpired`];
    /// every other failure maps to [`AuthError::TokenInvalid`].
    pub fn verify_and_decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })
    }

    /// Reads `exp` without checking the signature.
    ///
    /// The result must not be used to authorize anything.
    pub fn decode_expiry_only(&self, token: &str) -> Result<DateTime<Utc>, AuthError> {
        let data = decode::<ExpiryOnly>(token, &self.decoding_key, &self.expiry_validation)
            .map_err(|_| AuthError::TokenInvalid)?;
        DateTime::from_timestamp(data.claims.exp, 0).ok_or(AuthError::TokenInvalid)
    }

    /// Ledger key of a token: lowercase hex SHA-256 of the compact string.
    pub fn fingerprint(token: &str) -> TokenFingerprint {
        TokenFingerprint::from_hex(hex::encode(Sha256::digest(token.as_bytes())))
    }
}

fn ttl_from_minutes(minutes: u64) -> Result<Duration, AppError> {
    if minutes == 0 || minutes > MAX_TOKEN_TTL_MINUTES {
        return Err(AppError::configuration(format!(
            "auth.token_ttl_minutes must be between 1 and {MAX_TOKEN_TTL_MINUTES}, got {minutes}"
        )));
    }
    i64::try_from(minutes)
        .ok()
        .and_then(Duration::try_minutes)
        .ok_or_else(|| {
            AppError::configuration(format!("auth.token_ttl_minutes out of range: {minutes}"))
        })
}
