//! # condohub-auth
//!
//! Authentication core for CondoHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id credential hashing and password policy
//! - `jwt`: session token issuing, verification and fingerprinting
//! - `revocation`: the revocation ledger and its background purge
//! - `session`: the session authority: register, login, logout, authenticate
//! - `error`: the internal authentication error taxonomy

pub mod error;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod session;

mod deadline;

pub use error::AuthError;
pub use jwt::{Claims, IdentityClaims, IssuedToken, TokenCodec};
pub use password::{CredentialHasher, PasswordPolicy};
pub use revocation::{LedgerPurger, RevocationLedger};
pub use session::{Credentials, Registration, SessionAuthority, TokenVerdict};
