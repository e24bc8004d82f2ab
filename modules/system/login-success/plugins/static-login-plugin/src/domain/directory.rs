//! Config-seeded application user directory.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;
use login_success_sdk::{LoginSuccessError, UserDirectory};
use tracing::{debug, info};

use crate::config::StaticLoginPluginConfig;

/// How a user record came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOrigin {
    Seeded,
    Provisioned,
}

/// In-memory user directory.
///
/// Provisioning goes through the `DashMap` entry API, so concurrent first
/// logins of the same principal create exactly one record.
pub struct StaticUserDirectory {
    users: DashMap<String, UserOrigin>,
    provisioning_enabled: bool,
    denylist: HashSet<String>,
}

impl StaticUserDirectory {
    #[must_use]
    pub fn from_config(cfg: &StaticLoginPluginConfig) -> Self {
        let users = cfg
            .users
            .iter()
            .map(|u| (u.clone(), UserOrigin::Seeded))
            .collect();

        Self {
            users,
            provisioning_enabled: cfg.provisioning_enabled,
            denylist: cfg.provisioning_denylist.iter().cloned().collect(),
        }
    }

    #[must_use]
    pub fn origin(&self, principal: &str) -> Option<UserOrigin> {
        self.users.get(principal).map(|r| *r.value())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn is_valid_user(&self, principal: &str) -> Result<bool, LoginSuccessError> {
        Ok(self.users.contains_key(principal))
    }

    async fn provision_user(&self, principal: &str) -> Result<(), LoginSuccessError> {
        if !self.provisioning_enabled {
            debug!(principal = %principal, "Provisioning disabled in directory");
            return Ok(());
        }
        if self.denylist.contains(principal) {
            return Err(LoginSuccessError::UserDirectory(format!(
                "principal '{principal}' may not be provisioned"
            )));
        }

        let mut created = false;
        self.users.entry(principal.to_owned()).or_insert_with(|| {
            created = true;
            UserOrigin::Provisioned
        });
        if created {
            info!(principal = %principal, "Created service-config user");
        }
        Ok(())
    }
}
