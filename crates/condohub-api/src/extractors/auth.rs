//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header and asks the session authority about it.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use condohub_auth::{AuthError, Claims};

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller: verified claims plus the raw token, which is
/// forwarded upstream and revoked on logout.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Verified, unrevoked claims.
    pub claims: Claims,
    /// The bearer token as presented.
    pub token: String,
}

impl std::ops::Deref for AuthUser {
    type Target = Claims;
    fn deref(&self) -> &Self::Target {
        &self.claims
    }
}

/// Reads `Authorization: Bearer <token>`.
///
/// No header is [`AuthError::TokenMissing`]; any other scheme or an empty
/// token is [`AuthError::TokenInvalid`].
pub fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::TokenMissing)?
        .to_str()
        .map_err(|_| AuthError::TokenInvalid)?;

    let (scheme, token) = header.split_once(' ').ok_or(AuthError::TokenInvalid)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::TokenInvalid);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::TokenInvalid);
    }
    Ok(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.authority.authenticate(token).await?;

        Ok(AuthUser {
            claims,
            token: token.to_string(),
        })
    }
}

/// Caller that may or may not be authenticated.
///
/// A missing or rejected token yields `None`. A store failure still rejects
/// the request.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(ApiError(err)) if err.is_auth_failure() => {
                debug!("Proceeding without an authenticated caller");
                Ok(Self(None))
            }
            Err(err) => Err(err),
        }
    }
}
