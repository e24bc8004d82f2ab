//! Error types for the login success module.

use thiserror::Error;

/// Errors that can occur when using the login success API or its collaborators.
#[derive(Debug, Error)]
pub enum LoginSuccessError {
    /// The identity handed over by the authentication layer is unusable.
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    /// Session fixation protection could not be applied. Fatal to the request.
    #[error("security violation: {0}")]
    SecurityViolation(String),

    /// The application user store could not answer or provision.
    #[error("user directory unavailable: {0}")]
    UserDirectory(String),

    /// The audit sink rejected or lost an event.
    #[error("audit sink unavailable: {0}")]
    AuditSinkUnavailable(String),

    /// The session store could not complete the operation.
    #[error("session store unavailable: {0}")]
    SessionStore(String),

    /// The payload could not be written to the response.
    #[error("transport write failed: {0}")]
    Transport(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
