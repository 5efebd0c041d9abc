//! Process-local stores for single-instance deployments and tests.
//!
//! These keep their state in the process: a second instance would have its
//! own ledger, so a token revoked on one would still pass on the other.

pub mod revoked_token;
pub mod user;

pub use revoked_token::MemoryRevocationStore;
pub use user::MemoryIdentityStore;
