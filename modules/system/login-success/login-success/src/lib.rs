//! Login Success Module
//!
//! Runs right after an authentication layer has accepted credentials and
//! before the session is trusted:
//!
//! 1. rotates the session id (fixation protection)
//! 2. checks that the principal is a synced application user, provisioning
//!    it on demand when the authentication method allows it
//! 3. audits rejections
//! 4. answers with a JSON outcome (`200` or `412`) and hardened headers
//!
//! Provides the `LoginSuccessClient` trait implementation and an axum handler.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use module::{Collaborators, LoginSuccessModule};

#[cfg(test)]
mod test_support;
