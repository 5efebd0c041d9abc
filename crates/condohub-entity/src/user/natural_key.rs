//! The apartment + block pair that identifies a resident's unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique natural key of an identity, used in lieu of a login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NaturalKey {
    /// Apartment number as printed on the door (e.g. `"12"`, `"4B"`).
    pub apartment: String,
    /// Building block.
    pub block: i16,
}

impl NaturalKey {
    /// Builds a key, trimming surrounding whitespace from the apartment.
    pub fn new(apartment: impl AsRef<str>, block: i16) -> Self {
        Self {
            apartment: apartment.as_ref().trim().to_string(),
            block,
        }
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "apartment {} / block {}", self.apartment, self.block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apartment_is_trimmed() {
        assert_eq!(NaturalKey::new(" 12 ", 1), NaturalKey::new("12", 1));
        assert_ne!(NaturalKey::new("12", 1), NaturalKey::new("12", 2));
    }
}
