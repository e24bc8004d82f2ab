//! Audit trail of rejected logins.

use std::sync::Arc;

use login_success_sdk::{AuditEvent, AuthAuditSink, AuthStatus, AuthType, AuthenticatedIdentity};
use tracing::error;

/// Build a failure event from the identity and its request details.
#[must_use]
pub fn failure_event(
    reason: AuthStatus,
    auth_type: AuthType,
    identity: &AuthenticatedIdentity,
) -> AuditEvent {
    let details = identity.details();
    AuditEvent {
        reason,
        auth_type,
        principal: identity.principal().to_owned(),
        remote_address: details.remote_address.clone(),
        session_id: details.session_id.clone(),
        user_agent: details.user_agent.clone(),
    }
}

/// Writes failure events to the audit sink.
///
/// An unreachable sink must never keep the client from getting its answer,
/// so sink errors end up in the diagnostic log only.
pub struct AuditRecorder {
    sink: Arc<dyn AuthAuditSink>,
}

impl AuditRecorder {
    #[must_use]
    pub fn new(sink: Arc<dyn AuthAuditSink>) -> Self {
        Self { sink }
    }

    pub async fn record_failure(&self, event: AuditEvent) {
        if let Err(e) = self.sink.record_failed_login(&event).await {
            error!(
                principal = %event.principal,
                reason = ?event.reason,
                error = %e,
                "Failed to record login audit event"
            );
        }
    }
}
