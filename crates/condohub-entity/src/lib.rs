//! # condohub-entity
//!
//! Domain entity models for CondoHub. Every struct in this crate represents a
//! database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`.

pub mod revocation;
pub mod user;
