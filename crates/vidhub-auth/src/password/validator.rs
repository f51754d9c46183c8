//! Password policy enforcement for new passwords.

use vidhub_core::config::AuthConfig;
use vidhub_core::error::AppError;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    require_strong: bool,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            require_strong: config.require_strong_passwords,
        }
    }

    /// Validates a password against the policy.
    ///
    /// Returns the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if self.require_strong {
            let estimate = zxcvbn::zxcvbn(password, &[]);
            if estimate.score() < zxcvbn::Score::Three {
                return Err(AppError::validation(
                    "Password is too weak. Please use a stronger password.",
                ));
            }
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(&self, old_password: &str, new_password: &str) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(require_strong: bool) -> PasswordValidator {
        PasswordValidator::new(&AuthConfig {
            password_min_length: 8,
            require_strong_passwords: require_strong,
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_min_length() {
        let v = validator(false);
        assert!(v.validate("short").is_err());
        assert!(v.validate("password").is_ok());
    }

    #[test]
    fn test_strength_only_when_required() {
        assert!(validator(false).validate("aaaaaaaa").is_ok());
        assert!(validator(true).validate("aaaaaaaa").is_err());
        assert!(validator(true).validate("violet-Tundra-93-lantern").is_ok());
    }

    #[test]
    fn test_not_same() {
        let v = validator(false);
        assert!(v.validate_not_same("old-password", "old-password").is_err());
        assert!(v.validate_not_same("old-password", "new-password").is_ok());
    }
}
