//! Outcome of inspecting a presented token.

use crate::jwt::Claims;
use crate::error::AuthError;

/// Every state a presented token can be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerdict {
    /// Signature verifies, not expired, not in the ledger.
    Valid(Claims),
    /// Signature verifies but `exp` has passed.
    Expired,
    /// Signature and expiry check out but the token was revoked.
    Revoked,
    /// Anything that does not parse or verify.
    Malformed,
}

impl TokenVerdict {
    /// Claims if valid, otherwise the matching rejection.
    pub fn into_result(self) -> Result<Claims, AuthError> {
        match self {
            Self::Valid(claims) => Ok(claims),
            Self::Expired => Err(AuthError::TokenExpired),
            Self::Revoked => Err(AuthError::TokenRevoked),
            Self::Malformed => Err(AuthError::TokenInvalid),
        }
    }
}
