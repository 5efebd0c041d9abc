//! Shared-resource handlers forwarded to the upstream API.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;
use validator::Validate;

use condohub_core::AppError;

use crate::dto::request::ResourceRequest;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// POST /api/resources
pub async fn create_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ResourceRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    req.validate()?;
    let payload = serde_json::to_value(&req).map_err(AppError::from)?;
    let body = state
        .upstream
        .post("resources", &payload, Some(auth.token.as_str()))
        .await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/resources
pub async fn list_resources(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let body = state
        .upstream
        .get("resources", &[], Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}

/// GET /api/resources/{id}
pub async fn get_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<Value>, ApiError> {
    let body = state
        .upstream
        .get(&format!("resources/{id}"), &[], Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}

/// PUT /api/resources/{id}
pub async fn update_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    Json(req): Json<ResourceRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;
    let payload = serde_json::to_value(&req).map_err(AppError::from)?;
    let body = state
        .upstream
        .put(&format!("resources/{id}"), &payload, Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}

/// DELETE /api/resources/{id}
pub async fn delete_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<Value>, ApiError> {
    let body = state
        .upstream
        .delete(&format!("resources/{id}"), Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}
