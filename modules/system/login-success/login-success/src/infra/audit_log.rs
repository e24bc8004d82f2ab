//! Audit sink that writes to the `audit` tracing target.
//!
//! Suitable when a log pipeline ships the `audit` target to durable storage.

use async_trait::async_trait;
use login_success_sdk::{AuditEvent, AuthAuditSink, LoginSuccessError};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

#[async_trait]
impl AuthAuditSink for TracingAuditSink {
    async fn record_failed_login(&self, event: &AuditEvent) -> Result<(), LoginSuccessError> {
        tracing::warn!(
            target: "audit",
            reason = ?event.reason,
            reason_code = event.reason.code(),
            auth_type = ?event.auth_type,
            auth_type_code = event.auth_type.code(),
            principal = %event.principal,
            remote_address = %event.remote_address,
            session_id = %event.session_id,
            user_agent = %event.user_agent,
            "login failed"
        );
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use login_success_sdk::{AuthStatus, AuthType};

    use super::*;

    #[tokio::test]
    async fn never_fails() {
        let event = AuditEvent {
            reason: AuthStatus::UserNotFound,
            auth_type: AuthType::Password,
            principal: "carol".to_owned(),
            remote_address: "10.0.0.7".to_owned(),
            session_id: "sid".to_owned(),
            user_agent: "curl/8.0".to_owned(),
        };
        assert!(TracingAuditSink.record_failed_login(&event).await.is_ok());
    }
}
