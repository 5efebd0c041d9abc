//! Convenience result type alias for CondoHub.

use crate::error::AppError;

/// A specialized `Result` type for CondoHub operations.
pub type AppResult<T> = Result<T, AppError>;
