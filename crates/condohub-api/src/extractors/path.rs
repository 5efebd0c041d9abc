//! Typed path parameter helpers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use condohub_core::error::AppError;

use crate::error::ApiError;

/// Characters that would change the meaning of an upstream path.
const FORBIDDEN_CHARS: [char; 5] = ['/', '\\', '?', '#', '%'];

/// Checks that an identifier is a single, literal path segment.
pub fn parse_segment(s: &str) -> Result<&str, AppError> {
    let invalid = s.is_empty()
        || s == "."
        || s == ".."
        || s.contains(FORBIDDEN_CHARS)
        || s.chars().any(char::is_control);
    if invalid {
        tracing::warn!(segment = %s.escape_debug(), "Rejected path identifier");
        return Err(AppError::validation(format!(
            "Invalid identifier: {}",
            s.escape_debug()
        )));
    }
    Ok(s)
}

/// A single `{id}` path parameter that is safe to join into an upstream path.
#[derive(Debug, Clone)]
pub struct IdPath(pub String);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        parse_segment(&raw)?;
        Ok(Self(raw))
    }
}
