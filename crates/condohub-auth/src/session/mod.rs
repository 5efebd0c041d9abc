//! The session authority and its inputs and outputs.

pub mod authority;
pub mod model;
pub mod verdict;

pub use authority::SessionAuthority;
pub use model::{Credentials, Registration};
pub use verdict::TokenVerdict;
