//! Login success module wiring.

use std::sync::Arc;

use axum::Router;
use login_success_sdk::{
    AuthAuditSink, LoginSuccessClient, PayloadSerializer, SessionStore, UserDirectory,
};
use tracing::{info, warn};

use crate::api::rest::routes;
use crate::config::LoginSuccessConfig;
use crate::domain::{LoginSuccessLocalClient, Service};

/// External services the module talks to.
pub struct Collaborators {
    pub directory: Arc<dyn UserDirectory>,
    pub sessions: Arc<dyn SessionStore>,
    pub audit_sink: Arc<dyn AuthAuditSink>,
    pub serializer: Arc<dyn PayloadSerializer>,
}

/// Login success module.
///
/// Built once at startup from explicit configuration; afterwards it only
/// hands out the client and the REST router.
pub struct LoginSuccessModule {
    client: Arc<dyn LoginSuccessClient>,
}

impl LoginSuccessModule {
    /// Validate configuration and build the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cookie name is empty or not a valid
    /// cookie token.
    #[tracing::instrument(skip_all, fields(method = %cfg.authentication_method))]
    pub fn init(cfg: &LoginSuccessConfig, collaborators: Collaborators) -> anyhow::Result<Self> {
        let cookie = cfg.session_cookie_name.as_str();
        if cookie.is_empty()
            || !cookie
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
        {
            anyhow::bail!("invalid session_cookie_name '{cookie}'");
        }

        if !cfg.provisioning_allowed() {
            warn!("Authentication method is NONE: unknown principals will be rejected, never provisioned");
        }

        if !cfg.session_cookie_secure {
            warn!("Session cookie is sent without the Secure attribute");
        }

        info!(
            provisioning = cfg.provisioning_allowed(),
            session_cookie = %cfg.session_cookie_name,
            secure_cookie = cfg.session_cookie_secure,
            "Initializing login_success"
        );

        let svc = Arc::new(Service::new(cfg, collaborators));
        let client: Arc<dyn LoginSuccessClient> = Arc::new(LoginSuccessLocalClient::new(svc));
        Ok(Self { client })
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn LoginSuccessClient> {
        self.client.clone()
    }

    /// Router exposing the login success endpoint.
    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.client())
    }
}
