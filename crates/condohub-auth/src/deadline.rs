//! Upper bound on store calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use condohub_core::result::AppResult;

use crate::error::AuthError;

/// Runs a store call, turning both a store error and an elapsed deadline
/// into [`AuthError`]. Dropping the returned future drops the store call.
pub(crate) async fn bounded<T>(
    limit: Duration,
    operation: &'static str,
    call: impl Future<Output = AppResult<T>>,
) -> Result<T, AuthError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(AuthError::from),
        Err(_) => {
            warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Store call timed out"
            );
            Err(AuthError::StoreUnavailable(format!(
                "{operation} timed out"
            )))
        }
    }
}
