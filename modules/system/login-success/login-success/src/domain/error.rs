//! Domain errors for the login success module.

use login_success_sdk::LoginSuccessError;

/// Internal domain errors.
///
/// Only session rotation propagates collaborator failures. Directory, audit
/// and write failures are absorbed where they occur.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("session fixation protection failed: {0}")]
    FixationProtection(String),
}

impl From<LoginSuccessError> for DomainError {
    fn from(e: LoginSuccessError) -> Self {
        match e {
            LoginSuccessError::SecurityViolation(msg) | LoginSuccessError::SessionStore(msg) => {
                Self::FixationProtection(msg)
            }
            other => Self::FixationProtection(other.to_string()),
        }
    }
}

impl From<DomainError> for LoginSuccessError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::FixationProtection(msg) => Self::SecurityViolation(msg),
        }
    }
}
