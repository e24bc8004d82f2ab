#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use login_success_sdk::{
    AuditEvent, AuthAuditSink, AuthenticatedIdentity, LoginSuccessError, OutcomePayload,
    PayloadSerializer, RequestDetails, SessionStore, UserDirectory,
};
use parking_lot::Mutex;

use crate::config::LoginSuccessConfig;
use crate::infra::JsonPayloadSerializer;
use crate::module::Collaborators;

/// Ordered record of collaborator calls shared by all doubles.
#[derive(Default, Clone)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    #[must_use]
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.0.lock().iter().position(|e| e.starts_with(prefix))
    }

    #[must_use]
    pub fn count(&self, prefix: &str) -> usize {
        self.0.lock().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

#[derive(Clone, Copy)]
pub enum Provisioning {
    /// Provisioning creates the user.
    Creates,
    /// Provisioning reports success but the user never appears.
    Silent,
    /// Provisioning returns an error.
    Fails,
}

pub struct FakeDirectory {
    users: Mutex<HashSet<String>>,
    provisioning: Provisioning,
    lookup_fails: bool,
    journal: Journal,
}

impl FakeDirectory {
    pub fn new(users: &[&str], provisioning: Provisioning, journal: Journal) -> Self {
        Self {
            users: Mutex::new(users.iter().map(|u| (*u).to_owned()).collect()),
            provisioning,
            lookup_fails: false,
            journal,
        }
    }

    #[must_use]
    pub fn with_failing_lookup(mut self) -> Self {
        self.lookup_fails = true;
        self
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn is_valid_user(&self, principal: &str) -> Result<bool, LoginSuccessError> {
        self.journal.push(format!("lookup:{principal}"));
        if self.lookup_fails {
            return Err(LoginSuccessError::UserDirectory("lookup failed".to_owned()));
        }
        Ok(self.users.lock().contains(principal))
    }

    async fn provision_user(&self, principal: &str) -> Result<(), LoginSuccessError> {
        self.journal.push(format!("provision:{principal}"));
        match self.provisioning {
            Provisioning::Creates => {
                self.users.lock().insert(principal.to_owned());
                Ok(())
            }
            Provisioning::Silent => Ok(()),
            Provisioning::Fails => Err(LoginSuccessError::UserDirectory(
                "provisioning rejected".to_owned(),
            )),
        }
    }
}

pub struct FakeSessions {
    next_id: String,
    rotate_fails: bool,
    clear_fails: bool,
    journal: Journal,
}

impl FakeSessions {
    pub fn new(journal: Journal) -> Self {
        Self {
            next_id: "rotated-sid".to_owned(),
            rotate_fails: false,
            clear_fails: false,
            journal,
        }
    }

    #[must_use]
    pub fn rotating_to(mut self, id: &str) -> Self {
        id.clone_into(&mut self.next_id);
        self
    }

    #[must_use]
    pub fn with_failing_rotate(mut self) -> Self {
        self.rotate_fails = true;
        self
    }

    #[must_use]
    pub fn with_failing_clear(mut self) -> Self {
        self.clear_fails = true;
        self
    }
}

#[async_trait]
impl SessionStore for FakeSessions {
    async fn rotate(&self, current: Option<&str>) -> Result<String, LoginSuccessError> {
        self.journal
            .push(format!("rotate:{}", current.unwrap_or("<none>")));
        if self.rotate_fails {
            return Err(LoginSuccessError::SessionStore("store offline".to_owned()));
        }
        Ok(self.next_id.clone())
    }

    async fn clear_saved_request(&self, session_id: &str) -> Result<(), LoginSuccessError> {
        self.journal.push(format!("clear:{session_id}"));
        if self.clear_fails {
            return Err(LoginSuccessError::SessionStore("store offline".to_owned()));
        }
        Ok(())
    }
}

pub struct FakeAudit {
    events: Mutex<Vec<AuditEvent>>,
    fails: bool,
    journal: Journal,
}

impl FakeAudit {
    pub fn new(journal: Journal) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fails: false,
            journal,
        }
    }

    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fails = true;
        self
    }

    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl AuthAuditSink for FakeAudit {
    async fn record_failed_login(&self, event: &AuditEvent) -> Result<(), LoginSuccessError> {
        self.journal.push(format!("audit:{}", event.principal));
        if self.fails {
            return Err(LoginSuccessError::AuditSinkUnavailable(
                "sink unreachable".to_owned(),
            ));
        }
        self.events.lock().push(event.clone());
        Ok(())
    }
}

pub struct BrokenSerializer;

impl PayloadSerializer for BrokenSerializer {
    fn serialize(&self, _payload: &OutcomePayload) -> Result<Bytes, LoginSuccessError> {
        Err(LoginSuccessError::Transport("broken pipe".to_owned()))
    }
}

/// Fully wired doubles for one test.
pub struct Harness {
    pub journal: Journal,
    pub directory: Arc<FakeDirectory>,
    pub sessions: Arc<FakeSessions>,
    pub audit: Arc<FakeAudit>,
    pub serializer: Arc<dyn PayloadSerializer>,
}

impl Harness {
    pub fn new(users: &[&str], provisioning: Provisioning) -> Self {
        let journal = Journal::default();
        Self {
            directory: Arc::new(FakeDirectory::new(users, provisioning, journal.clone())),
            sessions: Arc::new(FakeSessions::new(journal.clone())),
            audit: Arc::new(FakeAudit::new(journal.clone())),
            serializer: Arc::new(JsonPayloadSerializer),
            journal,
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            directory: self.directory.clone(),
            sessions: self.sessions.clone(),
            audit_sink: self.audit.clone(),
            serializer: self.serializer.clone(),
        }
    }
}

pub fn config_with_method(method: &str) -> LoginSuccessConfig {
    LoginSuccessConfig {
        authentication_method: method.to_owned(),
        ..LoginSuccessConfig::default()
    }
}

pub fn identity(principal: &str) -> AuthenticatedIdentity {
    AuthenticatedIdentity::new(
        principal,
        RequestDetails {
            remote_address: "10.0.0.7".to_owned(),
            session_id: "pre-login-sid".to_owned(),
            user_agent: "Mozilla/5.0".to_owned(),
        },
    )
    .unwrap()
}
