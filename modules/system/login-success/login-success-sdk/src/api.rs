//! Public API trait for the login success module.
//!
//! The authentication layer calls this trait once credentials have been
//! accepted, before the session is trusted.

use async_trait::async_trait;

use crate::error::LoginSuccessError;
use crate::models::{AuthenticatedIdentity, LoginResponse, RequestShape};

/// Public API trait for login success handling.
///
/// ```ignore
/// let client: Arc<dyn LoginSuccessClient> = ...;
/// let response = client.on_authentication_success(&mut identity, shape).await?;
/// ```
#[async_trait]
pub trait LoginSuccessClient: Send + Sync {
    /// Confirm an authenticated identity and build the outcome response.
    ///
    /// On a not-synced principal the identity is de-authenticated in place and
    /// the returned response carries a 412 payload. That is a normal outcome,
    /// not an error.
    ///
    /// # Errors
    ///
    /// `SecurityViolation` if session fixation protection failed. No outcome
    /// response must be written in that case.
    async fn on_authentication_success(
        &self,
        identity: &mut AuthenticatedIdentity,
        shape: RequestShape,
    ) -> Result<LoginResponse, LoginSuccessError>;
}
