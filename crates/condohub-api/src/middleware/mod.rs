//! Tower/Axum middleware and guards.

pub mod cors;
pub mod logging;
pub mod rbac;
