use serde::Serialize;

use crate::error::ValidationError;

/// Login form fields. Transient, never persisted; serializes straight
/// into the urlencoded login body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Credentials {
        Credentials { username, password }
    }
}

/// Registration form fields, validated before any request is sent.
#[derive(Debug, Clone, Default)]
pub struct RegistrationDraft {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationDraft {
    pub fn new(username: String, password: String, confirm_password: String) -> RegistrationDraft {
        RegistrationDraft {
            username,
            password,
            confirm_password,
        }
    }

    /// Checks run in form order and stop at the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.chars().count() < 3 {
            return Err(ValidationError::UsernameTooShort);
        }

        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        if self.password.chars().count() < 6 {
            return Err(ValidationError::PasswordTooShort);
        }

        Ok(())
    }
}
