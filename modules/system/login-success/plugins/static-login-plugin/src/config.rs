//! Configuration for the static login plugin.

use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StaticLoginPluginConfig {
    /// Users known to the directory at startup.
    pub users: Vec<String>,

    /// Whether `provision_user` creates records.
    pub provisioning_enabled: bool,

    /// Principals that must never be created on demand.
    pub provisioning_denylist: Vec<String>,

    /// Lifetime of a session, counted from its last rotation.
    pub session_ttl_secs: u64,
}

impl Default for StaticLoginPluginConfig {
    fn default() -> Self {
        Self {
            users: vec!["admin".to_owned()],
            provisioning_enabled: true,
            provisioning_denylist: Vec::new(),
            session_ttl_secs: 30 * 60,
        }
    }
}
