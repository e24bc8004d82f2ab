//! Collaborator traits consumed by the login success module.
//!
//! User records, sessions and the audit trail are owned by other components.
//! The module only reaches them through these narrow interfaces, so each one
//! must provide its own concurrency safety.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::LoginSuccessError;
use crate::models::{AuditEvent, OutcomePayload};

/// Application user store.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether `principal` maps to a known, synchronized application user.
    ///
    /// # Errors
    ///
    /// `UserDirectory` if the store cannot be queried.
    async fn is_valid_user(&self, principal: &str) -> Result<bool, LoginSuccessError>;

    /// Create a minimal service-config user for `principal`.
    ///
    /// Must behave as create-if-absent: concurrent calls for the same
    /// principal are expected.
    ///
    /// # Errors
    ///
    /// `UserDirectory` if the record could not be created.
    async fn provision_user(&self, principal: &str) -> Result<(), LoginSuccessError>;
}

/// Server-side session state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Move the state of `current` (if any) to a freshly generated session id
    /// and invalidate `current`. Returns the new id.
    ///
    /// # Errors
    ///
    /// `SessionStore` if the session could not be migrated.
    async fn rotate(&self, current: Option<&str>) -> Result<String, LoginSuccessError>;

    /// Discard the saved pre-login request target of `session_id`.
    ///
    /// # Errors
    ///
    /// `SessionStore` if the store cannot be reached.
    async fn clear_saved_request(&self, session_id: &str) -> Result<(), LoginSuccessError>;
}

/// Durable audit trail of authentication outcomes.
#[async_trait]
pub trait AuthAuditSink: Send + Sync {
    /// Append a failed-login event.
    ///
    /// # Errors
    ///
    /// `AuditSinkUnavailable` if the event could not be stored.
    async fn record_failed_login(&self, event: &AuditEvent) -> Result<(), LoginSuccessError>;
}

/// Turns an outcome payload into response body bytes.
pub trait PayloadSerializer: Send + Sync {
    /// # Errors
    ///
    /// `Transport` if the payload cannot be encoded.
    fn serialize(&self, payload: &OutcomePayload) -> Result<Bytes, LoginSuccessError>;
}
