//! Session token issuing and verification.

pub mod claims;
pub mod codec;

pub use claims::{Claims, IdentityClaims};
pub use codec::{IssuedToken, TokenCodec};
