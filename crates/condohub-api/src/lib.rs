//! # condohub-api
//!
//! HTTP API layer for CondoHub built on Axum.
//!
//! Authentication routes talk to the session authority. Everything else is
//! authenticated here and then forwarded to the upstream API with the
//! caller's bearer token.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
