//! Route definitions for the CondoHub HTTP API.
//!
//! All routes are mounted under `/api`.

use std::time::Duration;

use axum::http::StatusCode;
use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(booking_routes())
        .merge(notice_routes())
        .merge(resource_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .nest("/api", api_routes)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Session endpoints plus user management.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(handlers::auth::register))
        .route("/users/login", post(handlers::auth::login))
        .route("/users/logout", post(handlers::auth::logout))
        .route("/users/me", get(handlers::auth::me))
        .route(
            "/users/profile",
            get(handlers::users::get_profile).put(handlers::users::update_profile),
        )
        .route("/users", get(handlers::users::list_users))
        .route("/users/{id}", delete(handlers::users::delete_user))
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            post(handlers::bookings::create_booking).get(handlers::bookings::list_bookings),
        )
        .route(
            "/bookings/user/{user_id}",
            get(handlers::bookings::list_user_bookings),
        )
        .route(
            "/bookings/availability/{resource_id}",
            get(handlers::bookings::check_availability),
        )
        .route(
            "/bookings/reserved-times",
            get(handlers::bookings::reserved_times),
        )
        .route("/bookings/{id}", delete(handlers::bookings::delete_booking))
}

fn notice_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notices",
            post(handlers::notices::create_notice).get(handlers::notices::list_notices),
        )
        .route(
            "/notices/{id}",
            put(handlers::notices::update_notice).delete(handlers::notices::delete_notice),
        )
}

fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resources",
            post(handlers::resources::create_resource).get(handlers::resources::list_resources),
        )
        .route(
            "/resources/{id}",
            get(handlers::resources::get_resource)
                .put(handlers::resources::update_resource)
                .delete(handlers::resources::delete_resource),
        )
}
