//! Route handlers grouped by resource.

pub mod auth;
pub mod bookings;
pub mod health;
pub mod notices;
pub mod resources;
pub mod users;
