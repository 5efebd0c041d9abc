//! Session handlers: register, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;
use validator::Validate;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{
    LoginResponse, MeResponse, MessageResponse, RegisterResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    req.validate()?;
    info!(apartment = %req.apartment, block = req.block, "Registering user");

    let user = state
        .authority
        .register(req.into(), caller.as_ref().map(|c| &c.claims))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(user),
        }),
    ))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    req.validate()?;
    info!(apartment = %req.apartment, block = req.block, "Login attempt");

    let issued = state.authority.login(req.into()).await?;

    Ok(Json(LoginResponse {
        message: "User logged in successfully".to_string(),
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

/// POST /api/users/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.authority.logout(&auth.token).await?;
    Ok(Json(MessageResponse::new("User logged out successfully")))
}

/// GET /api/users/me
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse::from(&auth.claims))
}
