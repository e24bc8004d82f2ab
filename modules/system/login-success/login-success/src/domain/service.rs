//! Orchestrates the login success flow.

use login_success_sdk::{
    AuthStatus, AuthType, AuthenticatedIdentity, LoginResponse, RequestShape, ValidityOutcome,
};
use tracing::{debug, info};

use super::audit::{AuditRecorder, failure_event};
use super::fixation::SessionFixationGuard;
use super::resolver::UserValidityResolver;
use super::response::ResponseComposer;
use super::DomainError;
use crate::config::LoginSuccessConfig;
use crate::module::Collaborators;

/// Intermediate states of a single pass. Terminal states are reported as
/// [`login_success_sdk::LoginState`].
#[derive(Debug, Clone, Copy)]
enum FlowState {
    FixationProtected,
    ValidityChecked,
    Accepted,
    Rejected,
}

/// Login success service.
///
/// Holds no per-request state; every call is an independent single pass:
/// fixation guard, validity check, optional audit, response.
pub struct Service {
    allow_provisioning: bool,
    guard: SessionFixationGuard,
    resolver: UserValidityResolver,
    audit: AuditRecorder,
    composer: ResponseComposer,
}

impl Service {
    #[must_use]
    pub fn new(config: &LoginSuccessConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            directory,
            sessions,
            audit_sink,
            serializer,
        } = collaborators;

        Self {
            allow_provisioning: config.provisioning_allowed(),
            guard: SessionFixationGuard::new(
                sessions.clone(),
                config.session_cookie_name.clone(),
                config.session_cookie_secure,
            ),
            resolver: UserValidityResolver::new(directory),
            audit: AuditRecorder::new(audit_sink),
            composer: ResponseComposer::new(serializer, sessions),
        }
    }

    /// Confirm `identity` and build its response.
    ///
    /// # Errors
    ///
    /// `FixationProtection` if the session could not be rotated. Nothing has
    /// been composed at that point and the caller must not answer with an
    /// outcome payload.
    #[tracing::instrument(skip_all, fields(principal = %identity.principal()))]
    pub async fn on_authentication_success(
        &self,
        identity: &mut AuthenticatedIdentity,
        shape: RequestShape,
    ) -> Result<LoginResponse, DomainError> {
        let session = self.guard.protect(identity).await?;
        trace_state(FlowState::FixationProtected);

        let outcome = self
            .resolver
            .resolve(identity.principal(), self.allow_provisioning)
            .await;
        trace_state(FlowState::ValidityChecked);

        match outcome {
            ValidityOutcome::Valid => trace_state(FlowState::Accepted),
            ValidityOutcome::InvalidNotSynced => {
                self.audit
                    .record_failure(failure_event(
                        AuthStatus::UserNotFound,
                        AuthType::Password,
                        identity,
                    ))
                    .await;
                identity.revoke();
                trace_state(FlowState::Rejected);
                info!(
                    "Auth Succeeded but user is not synced yet for {}",
                    identity.principal()
                );
            }
        }

        let response = self
            .composer
            .respond(outcome, identity.principal(), shape, &session)
            .await;
        debug!(state = ?response.state, status = %response.status, "Login success flow finished");
        Ok(response)
    }
}

fn trace_state(state: FlowState) {
    debug!(state = ?state, "Login success flow transition");
}
