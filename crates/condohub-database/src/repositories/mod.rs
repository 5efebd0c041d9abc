//! PostgreSQL implementations of the store traits.

pub mod revoked_token;
pub mod user;

pub use revoked_token::RevokedTokenRepository;
pub use user::UserRepository;
