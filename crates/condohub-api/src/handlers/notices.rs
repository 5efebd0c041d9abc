//! Notice board handlers forwarded to the upstream API.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;
use validator::Validate;

use condohub_core::AppError;

use crate::dto::request::NoticeRequest;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// POST /api/notices
pub async fn create_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NoticeRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    req.validate()?;
    let payload = serde_json::to_value(&req).map_err(AppError::from)?;
    let body = state
        .upstream
        .post("notices", &payload, Some(auth.token.as_str()))
        .await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/notices
pub async fn list_notices(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let body = state.upstream.get("notices", &[], Some(auth.token.as_str())).await?;
    Ok(Json(body))
}

/// PUT /api/notices/{id}
pub async fn update_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    Json(req): Json<NoticeRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;
    let payload = serde_json::to_value(&req).map_err(AppError::from)?;
    let body = state
        .upstream
        .put(&format!("notices/{id}"), &payload, Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}

/// DELETE /api/notices/{id}
pub async fn delete_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<Value>, ApiError> {
    let body = state
        .upstream
        .delete(&format!("notices/{id}"), Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}
