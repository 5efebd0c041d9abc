//! User handlers forwarded to the upstream API.

use axum::Json;
use axum::extract::State;
use serde_json::Value;
use validator::Validate;

use crate::dto::request::UpdateProfileRequest;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let body = state
        .upstream
        .get("users/profile", &[], Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}

/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;
    let payload = serde_json::to_value(&req).map_err(condohub_core::AppError::from)?;

    let body = state
        .upstream
        .put("users/profile", &payload, Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let body = state.upstream.get("users", &[], Some(auth.token.as_str())).await?;
    Ok(Json(body))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<Value>, ApiError> {
    require_admin(&auth)?;
    tracing::info!(admin_id = %auth.sub, target = %id, "Deleting user");

    let body = state
        .upstream
        .delete(&format!("users/{id}"), Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}
