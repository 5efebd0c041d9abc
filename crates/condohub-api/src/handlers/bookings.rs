//! Booking handlers forwarded to the upstream API.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::Value;
use validator::Validate;

use condohub_core::AppError;

use crate::dto::request::{
    AvailabilityQuery, BookingListQuery, CreateBookingRequest, ReservedTimesQuery,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    req.validate()?;
    let payload = serde_json::to_value(&req).map_err(AppError::from)?;

    let body = state
        .upstream
        .post("bookings", &payload, Some(auth.token.as_str()))
        .await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Value>, ApiError> {
    let body = state
        .upstream
        .get("bookings", &query.into_pairs(), Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}

/// GET /api/bookings/user/{user_id}
pub async fn list_user_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> Result<Json<Value>, ApiError> {
    let body = state
        .upstream
        .get(&format!("bookings/user/{user_id}"), &[], Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}

/// DELETE /api/bookings/{id}
pub async fn delete_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<Value>, ApiError> {
    let body = state
        .upstream
        .delete(&format!("bookings/{id}"), Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}

/// GET /api/bookings/availability/{resource_id}
///
/// Public: no bearer token is required or forwarded.
pub async fn check_availability(
    State(state): State<AppState>,
    IdPath(resource_id): IdPath,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, ApiError> {
    let pairs = [
        ("startTime".to_string(), query.start_time),
        ("endTime".to_string(), query.end_time),
    ];
    let body = state
        .upstream
        .get(&format!("bookings/availability/{resource_id}"), &pairs, None)
        .await?;
    Ok(Json(body))
}

/// GET /api/bookings/reserved-times
pub async fn reserved_times(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ReservedTimesQuery>,
) -> Result<Json<Value>, ApiError> {
    let pairs = [
        ("resourceType".to_string(), query.resource_type),
        ("date".to_string(), query.date),
    ];
    let body = state
        .upstream
        .get("bookings/reserved-times", &pairs, Some(auth.token.as_str()))
        .await?;
    Ok(Json(body))
}
