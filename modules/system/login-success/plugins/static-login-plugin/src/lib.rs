#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Login Plugin
//!
//! In-memory collaborators for the login success module, for development and
//! testing:
//!
//! - [`StaticUserDirectory`](domain::StaticUserDirectory): users seeded from
//!   configuration, with create-if-absent provisioning
//! - [`InMemorySessionStore`](domain::InMemorySessionStore): session id
//!   rotation and saved pre-login request targets
//!
//! ## Configuration
//!
//! ```yaml
//! static_login_plugin:
//!   users: ["admin", "alice"]
//!   provisioning_enabled: true
//!   provisioning_denylist: ["root"]
//!   session_ttl_secs: 1800
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use module::StaticLoginPlugin;
