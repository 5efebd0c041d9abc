//! Inputs to the session authority.

use condohub_entity::user::{NaturalKey, UserRole};

/// Login input: the unit's natural key and the secret.
#[derive(Clone)]
pub struct Credentials {
    /// Apartment number.
    pub apartment: String,
    /// Building block.
    pub block: i16,
    /// Plaintext password.
    pub password: String,
}

impl Credentials {
    /// The natural key being logged into.
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(&self.apartment, self.block)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("apartment", &self.apartment)
            .field("block", &self.block)
            .finish_non_exhaustive()
    }
}

/// Registration input, already shape-checked by the caller.
#[derive(Clone)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Apartment number.
    pub apartment: String,
    /// Building block.
    pub block: i16,
    /// Requested role; `None` means resident.
    pub role: Option<UserRole>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("apartment", &self.apartment)
            .field("block", &self.block)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
