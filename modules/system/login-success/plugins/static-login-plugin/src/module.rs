//! Static login plugin wiring.

use std::sync::Arc;
use std::time::Duration;

use login_success_sdk::{SessionStore, UserDirectory};
use tracing::info;

use crate::config::StaticLoginPluginConfig;
use crate::domain::{InMemorySessionStore, StaticUserDirectory};

/// Static login plugin.
///
/// Owns the in-memory directory and session store and hands them out as
/// login success collaborators.
pub struct StaticLoginPlugin {
    directory: Arc<StaticUserDirectory>,
    sessions: Arc<InMemorySessionStore>,
}

impl StaticLoginPlugin {
    #[must_use]
    pub fn from_config(cfg: &StaticLoginPluginConfig) -> Self {
        if cfg.provisioning_enabled {
            tracing::warn!(
                "Static login plugin keeps provisioned users in memory only. \
                 Do NOT use it in production."
            );
        }

        info!(
            user_count = cfg.users.len(),
            provisioning_enabled = cfg.provisioning_enabled,
            denylist_count = cfg.provisioning_denylist.len(),
            session_ttl_secs = cfg.session_ttl_secs,
            "Static login plugin initialized"
        );

        Self {
            directory: Arc::new(StaticUserDirectory::from_config(cfg)),
            sessions: Arc::new(InMemorySessionStore::with_ttl(Duration::from_secs(
                cfg.session_ttl_secs,
            ))),
        }
    }

    #[must_use]
    pub fn directory(&self) -> Arc<dyn UserDirectory> {
        self.directory.clone()
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        self.sessions.clone()
    }

    /// Concrete session store, for layers that save pre-login requests.
    #[must_use]
    pub fn session_store(&self) -> Arc<InMemorySessionStore> {
        self.sessions.clone()
    }

    #[must_use]
    pub fn user_directory(&self) -> Arc<StaticUserDirectory> {
        self.directory.clone()
    }
}
