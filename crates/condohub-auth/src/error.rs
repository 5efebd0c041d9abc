//! Authentication error taxonomy.
//!
//! Kinds stay distinct inside the crate for logging. At the HTTP boundary
//! every token rejection collapses into one `Unauthorized`.

use thiserror::Error;
use tracing::{debug, warn};

use condohub_core::error::{AppError, ErrorKind};

/// Failure of a session authority operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Login lookup miss or password mismatch. Never split by cause.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// No bearer token on an authenticated route.
    #[error("Bearer token missing")]
    TokenMissing,
    /// Malformed, mis-signed or structurally incomplete token.
    #[error("Token is invalid")]
    TokenInvalid,
    /// Signature valid but past `exp`.
    #[error("Token has expired")]
    TokenExpired,
    /// Signature and expiry valid but present in the ledger.
    #[error("Token has been revoked")]
    TokenRevoked,
    /// Authenticated but not allowed to do this.
    #[error("{0}")]
    Forbidden(String),
    /// Natural key or email already registered.
    #[error("{0}")]
    Conflict(String),
    /// Input rejected by policy.
    #[error("{0}")]
    Validation(String),
    /// A store call failed or did not answer in time.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    /// Anything else (hashing failure, task panic).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// True for the four kinds that reject a presented token.
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            Self::TokenMissing | Self::TokenInvalid | Self::TokenExpired | Self::TokenRevoked
        )
    }

    /// Stable name used as a structured log field.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::TokenMissing => "token_missing",
            Self::TokenInvalid => "token_invalid",
            Self::TokenExpired => "token_expired",
            Self::TokenRevoked => "token_revoked",
            Self::Forbidden(_) => "forbidden",
            Self::Conflict(_) => "conflict",
            Self::Validation(_) => "validation",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenRevoked => {
                warn!(reason = err.reason(), "Rejected revoked token");
                AppError::unauthorized("Unauthorized")
            }
            AuthError::TokenMissing | AuthError::TokenInvalid | AuthError::TokenExpired => {
                debug!(reason = err.reason(), "Rejected token");
                AppError::unauthorized("Unauthorized")
            }
            AuthError::InvalidCredentials => AppError::unauthorized("Invalid credentials"),
            AuthError::Forbidden(msg) => AppError::forbidden(msg),
            AuthError::Conflict(msg) => AppError::conflict(msg),
            AuthError::Validation(msg) => AppError::validation(msg),
            AuthError::StoreUnavailable(msg) => {
                warn!(error = %msg, "Store unavailable, failing closed");
                AppError::service_unavailable("Service temporarily unavailable")
            }
            AuthError::Internal(msg) => AppError::internal(msg),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind {
            ErrorKind::Conflict => Self::Conflict(err.message),
            ErrorKind::Validation => Self::Validation(err.message),
            _ => Self::StoreUnavailable(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rejections_collapse_to_one_response() {
        let rejections = [
            AuthError::TokenMissing,
            AuthError::TokenInvalid,
            AuthError::TokenExpired,
            AuthError::TokenRevoked,
        ];
        for err in rejections {
            assert!(err.is_token_rejection());
            let app: AppError = err.into();
            assert_eq!(app.kind, ErrorKind::Unauthorized);
            assert_eq!(app.message, "Unauthorized");
        }
    }

    #[test]
    fn test_store_failure_fails_closed() {
        let app: AppError = AuthError::StoreUnavailable("timeout".into()).into();
        assert_eq!(app.kind, ErrorKind::ServiceUnavailable);
        assert!(!AuthError::StoreUnavailable("x".into()).is_token_rejection());
    }

    #[test]
    fn test_store_conflict_survives_round_trip() {
        let auth: AuthError = AppError::conflict("User already exists").into();
        assert_eq!(auth, AuthError::Conflict("User already exists".into()));
        let auth: AuthError = AppError::database("connection reset").into();
        assert!(matches!(auth, AuthError::StoreUnavailable(_)));
    }
}
