//! Login Success SDK
//!
//! This crate provides the public API for the `login_success` module:
//!
//! - [`LoginSuccessClient`] - Public API trait for the authentication layer
//! - [`UserDirectory`], [`SessionStore`], [`AuthAuditSink`], [`PayloadSerializer`] -
//!   collaborator traits implemented by plugins and infrastructure
//! - [`AuthenticatedIdentity`], [`OutcomePayload`], [`AuditEvent`] - models
//! - [`LoginSuccessError`] - Error types
//!
//! ## Usage
//!
//! The authentication layer hands every accepted identity to the client:
//!
//! ```ignore
//! use login_success_sdk::{LoginSuccessClient, RequestShape};
//!
//! let shape = RequestShape::from_headers(req.headers());
//! let response = client.on_authentication_success(&mut identity, shape).await?;
//! if !identity.is_authenticated() {
//!     // the principal is not synced yet; response carries a 412
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;

// Re-export main types at crate root
pub use api::LoginSuccessClient;
pub use error::LoginSuccessError;
pub use models::{
    AuditEvent, AuthStatus, AuthType, AuthenticatedIdentity, LoginResponse, LoginState,
    OutcomePayload, RequestDetails, RequestShape, ValidityOutcome,
};
pub use plugin_api::{AuthAuditSink, PayloadSerializer, SessionStore, UserDirectory};
