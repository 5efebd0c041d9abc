//! Resident and administrator identities.

pub mod model;
pub mod natural_key;
pub mod role;

pub use model::{NewUser, User};
pub use natural_key::NaturalKey;
pub use role::UserRole;
