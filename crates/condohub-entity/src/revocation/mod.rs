//! Revocation ledger entities.

pub mod model;

pub use model::{RevokedToken, TokenFingerprint};
