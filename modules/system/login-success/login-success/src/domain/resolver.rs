//! Maps an authenticated principal to an application user.

use std::sync::Arc;

use login_success_sdk::{UserDirectory, ValidityOutcome};
use tracing::{debug, info, warn};

/// Decides whether a principal is a known, synced application user.
///
/// Identity providers such as SSO may vouch for principals the user store has
/// never seen. When provisioning is allowed, such principals get a minimal
/// service-config user and are looked up once more.
pub struct UserValidityResolver {
    directory: Arc<dyn UserDirectory>,
}

impl UserValidityResolver {
    #[must_use]
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve `principal`. Directory failures are absorbed into
    /// [`ValidityOutcome::InvalidNotSynced`].
    pub async fn resolve(&self, principal: &str, allow_provisioning: bool) -> ValidityOutcome {
        if self.lookup(principal).await {
            return ValidityOutcome::Valid;
        }

        if !allow_provisioning {
            debug!(principal = %principal, "Unknown principal, provisioning disabled");
            return ValidityOutcome::InvalidNotSynced;
        }

        if let Err(e) = self.directory.provision_user(principal).await {
            warn!(principal = %principal, error = %e, "Provisioning failed");
            return ValidityOutcome::InvalidNotSynced;
        }

        if self.lookup(principal).await {
            info!(principal = %principal, "Provisioned user on first login");
            ValidityOutcome::Valid
        } else {
            ValidityOutcome::InvalidNotSynced
        }
    }

    async fn lookup(&self, principal: &str) -> bool {
        match self.directory.is_valid_user(principal).await {
            Ok(found) => found,
            Err(e) => {
                warn!(principal = %principal, error = %e, "User lookup failed");
                false
            }
        }
    }
}
