//! # condohub-database
//!
//! Persistence for identities and the token revocation ledger.
//!
//! The [`store`] traits are the seam the session authority talks to. Two
//! families implement them: PostgreSQL [`repositories`] (shared, durable,
//! uniqueness enforced by table constraints) and [`memory`] stores for a
//! single-instance deployment and for tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use provider::Stores;
pub use store::{IdentityStore, RevocationStore};
