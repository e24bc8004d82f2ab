//! Domain models for the login success module.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::LoginSuccessError;

/// Header used by script clients to mark a request as programmatic.
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// Value of [`REQUESTED_WITH_HEADER`] sent by `XMLHttpRequest`-style clients.
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Request-derived details captured by the authentication layer.
///
/// Every field is an empty string when the transport could not supply it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDetails {
    pub remote_address: String,
    pub session_id: String,
    pub user_agent: String,
}

/// An identity whose credentials were accepted but which is not yet trusted.
///
/// Lives for a single request. The login success flow may revoke it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    principal: String,
    authenticated: bool,
    details: RequestDetails,
}

impl AuthenticatedIdentity {
    /// Create an authenticated identity for `principal`.
    ///
    /// # Errors
    ///
    /// `InvalidIdentity` if `principal` is empty or whitespace only.
    pub fn new(
        principal: impl Into<String>,
        details: RequestDetails,
    ) -> Result<Self, LoginSuccessError> {
        let principal = principal.into();
        if principal.trim().is_empty() {
            return Err(LoginSuccessError::InvalidIdentity(
                "principal must not be empty".to_owned(),
            ));
        }
        Ok(Self {
            principal,
            authenticated: true,
            details,
        })
    }

    #[must_use]
    pub fn principal(&self) -> &str {
        &self.principal
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn details(&self) -> &RequestDetails {
        &self.details
    }

    /// Mark the identity as not trusted.
    pub fn revoke(&mut self) {
        self.authenticated = false;
    }
}

/// Whether the principal maps to a usable application user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityOutcome {
    Valid,
    InvalidNotSynced,
}

/// Shape of the incoming login request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestShape {
    /// Full-page browser navigation.
    #[default]
    Interactive,
    /// Script / AJAX call flagged with `X-Requested-With: XMLHttpRequest`.
    Programmatic,
}

impl RequestShape {
    /// Derive the shape from the conventional request-origin marker header.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let is_xhr = headers
            .get(REQUESTED_WITH_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(XML_HTTP_REQUEST));
        if is_xhr {
            Self::Programmatic
        } else {
            Self::Interactive
        }
    }
}

/// Outcome body written to the client.
///
/// Serialized as `{"statusCode":200,"msgDesc":"Login Successful"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomePayload {
    pub status_code: u16,
    pub msg_desc: String,
}

impl OutcomePayload {
    #[must_use]
    pub fn new(status: StatusCode, msg_desc: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            msg_desc: msg_desc.into(),
        }
    }
}

/// Authentication status reason codes persisted by audit sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthStatus {
    Unknown,
    Success,
    WrongPassword,
    Disabled,
    Locked,
    PasswordExpired,
    UserNotFound,
}

impl AuthStatus {
    /// Stable numeric code.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Unknown => 0,
            Self::Success => 1,
            Self::WrongPassword => 2,
            Self::Disabled => 3,
            Self::Locked => 4,
            Self::PasswordExpired => 5,
            Self::UserNotFound => 6,
        }
    }
}

/// Credential path that produced the authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    Unknown,
    Password,
    Kerberos,
    Sso,
    TrustedProxy,
}

impl AuthType {
    /// Stable numeric code.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Unknown => 0,
            Self::Password => 1,
            Self::Kerberos => 2,
            Self::Sso => 3,
            Self::TrustedProxy => 4,
        }
    }
}

/// Write-once audit record of a login outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub reason: AuthStatus,
    pub auth_type: AuthType,
    pub principal: String,
    pub remote_address: String,
    pub session_id: String,
    pub user_agent: String,
}

/// Terminal state of the login success flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    RespondedOk,
    RespondedRejected,
}

/// Transport-independent response produced for every handled login.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub state: LoginState,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}
