//! Role guards for handlers.

use condohub_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated user has the Admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.is_admin() {
        tracing::warn!(user_id = %auth.sub, "Admin access denied");
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}
