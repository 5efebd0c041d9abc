//! Password policy enforcement for new passwords.

use condohub_core::config::AuthConfig;

use crate::error::AuthError;

/// Length bounds plus a letter-and-digit rule.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
    max_length: usize,
}

impl PasswordPolicy {
    /// Creates a policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length,
        }
    }

    /// Returns the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AuthError> {
        let length = password.chars().count();

        if length < self.min_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if length > self.max_length {
            return Err(AuthError::Validation(format!(
                "Password must be at most {} characters long",
                self.max_length
            )));
        }

        if !password.chars().any(char::is_alphabetic) {
            return Err(AuthError::Validation(
                "Password must contain at least one letter".to_string(),
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AuthError::Validation(
                "Password must contain at least one digit".to_string(),
            ));
        }

        Ok(())
    }
}
