//! Session fixation protection.
//!
//! Any session id that existed before authentication may have been planted by
//! an attacker, so it is migrated to a fresh id before anything else happens.

use std::sync::Arc;

use http::HeaderValue;
use login_success_sdk::{AuthenticatedIdentity, SessionStore};
use tracing::debug;

use super::DomainError;

/// Session id bound to the response after rotation.
#[derive(Debug, Clone)]
pub struct SessionBinding {
    pub session_id: String,
    /// `Set-Cookie` value carrying `session_id`.
    pub set_cookie: HeaderValue,
}

pub struct SessionFixationGuard {
    sessions: Arc<dyn SessionStore>,
    cookie_name: String,
    secure_cookie: bool,
}

impl SessionFixationGuard {
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        cookie_name: impl Into<String>,
        secure_cookie: bool,
    ) -> Self {
        Self {
            sessions,
            cookie_name: cookie_name.into(),
            secure_cookie,
        }
    }

    /// Rotate the session of `identity` and build the cookie binding it.
    ///
    /// # Errors
    ///
    /// `FixationProtection` if the store fails, hands back the old id, or the
    /// new id cannot be carried in a cookie. The request must be aborted.
    pub async fn protect(
        &self,
        identity: &AuthenticatedIdentity,
    ) -> Result<SessionBinding, DomainError> {
        let current = Some(identity.details().session_id.as_str()).filter(|s| !s.is_empty());

        let session_id = self.sessions.rotate(current).await?;

        if session_id.is_empty() || current == Some(session_id.as_str()) {
            return Err(DomainError::FixationProtection(
                "session id was not rotated".to_owned(),
            ));
        }

        let mut cookie = format!(
            "{}={session_id}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name
        );
        if self.secure_cookie {
            cookie.push_str("; Secure");
        }
        let set_cookie = HeaderValue::from_str(&cookie).map_err(|e| {
            DomainError::FixationProtection(format!("invalid session cookie: {e}"))
        })?;

        debug!(had_session = current.is_some(), "Session id rotated");
        Ok(SessionBinding {
            session_id,
            set_cookie,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::test_support::{FakeSessions, Journal, identity};

    #[tokio::test]
    async fn rotates_existing_session() {
        let journal = Journal::default();
        let guard = SessionFixationGuard::new(
            Arc::new(FakeSessions::new(journal.clone()).rotating_to("fresh")),
            "SESSION",
            true,
        );

        let binding = guard.protect(&identity("alice")).await.unwrap();

        assert_eq!(binding.session_id, "fresh");
        assert_eq!(
            binding.set_cookie.to_str().unwrap(),
            "SESSION=fresh; Path=/; HttpOnly; SameSite=Lax; Secure"
        );
        assert_eq!(journal.entries(), vec!["rotate:pre-login-sid".to_owned()]);
    }

    #[tokio::test]
    async fn secure_attribute_can_be_turned_off() {
        let guard = SessionFixationGuard::new(
            Arc::new(FakeSessions::new(Journal::default()).rotating_to("fresh")),
            "SESSION",
            false,
        );

        let binding = guard.protect(&identity("alice")).await.unwrap();

        assert_eq!(
            binding.set_cookie.to_str().unwrap(),
            "SESSION=fresh; Path=/; HttpOnly; SameSite=Lax"
        );
    }

    #[tokio::test]
    async fn store_failure_is_fatal() {
        let journal = Journal::default();
        let guard = SessionFixationGuard::new(
            Arc::new(FakeSessions::new(journal).with_failing_rotate()),
            "SESSION",
            true,
        );

        let err = guard.protect(&identity("alice")).await.unwrap_err();
        assert!(matches!(err, DomainError::FixationProtection(_)));
    }

    #[tokio::test]
    async fn unchanged_id_is_rejected() {
        let journal = Journal::default();
        let guard = SessionFixationGuard::new(
            Arc::new(FakeSessions::new(journal).rotating_to("pre-login-sid")),
            "SESSION",
            true,
        );

        let err = guard.protect(&identity("alice")).await.unwrap_err();
        assert!(matches!(err, DomainError::FixationProtection(msg) if msg.contains("not rotated")));
    }

    #[tokio::test]
    async fn invalid_cookie_name_is_fatal() {
        let journal = Journal::default();
        let guard =
            SessionFixationGuard::new(Arc::new(FakeSessions::new(journal)), "BAD\nNAME", true);

        let err = guard.protect(&identity("alice")).await.unwrap_err();
        assert!(matches!(err, DomainError::FixationProtection(_)));
    }
}
