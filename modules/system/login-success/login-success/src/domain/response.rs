//! Outcome payload and response metadata.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{CACHE_CONTROL, CONTENT_TYPE, SET_COOKIE, X_FRAME_OPTIONS};
use http::{HeaderMap, HeaderValue, StatusCode};
use login_success_sdk::{
    LoginResponse, LoginState, OutcomePayload, PayloadSerializer, RequestShape, SessionStore,
    ValidityOutcome,
};
use tracing::{debug, info, warn};

use super::fixation::SessionBinding;

pub const LOGIN_SUCCESSFUL: &str = "Login Successful";
pub const NOT_SYNCED_PREFIX: &str = "Auth Succeeded but user is not synced yet or federated-user for ";
pub const CONTENT_TYPE_JSON_UTF8: &str = "application/json;charset=UTF-8";

/// Builds the outcome payload and writes it with hardened headers.
pub struct ResponseComposer {
    serializer: Arc<dyn PayloadSerializer>,
    sessions: Arc<dyn SessionStore>,
}

impl ResponseComposer {
    #[must_use]
    pub fn new(serializer: Arc<dyn PayloadSerializer>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            serializer,
            sessions,
        }
    }

    /// Payload for `outcome`. Identical for both request shapes.
    #[must_use]
    pub fn compose(outcome: ValidityOutcome, principal: &str) -> OutcomePayload {
        match outcome {
            ValidityOutcome::Valid => OutcomePayload::new(StatusCode::OK, LOGIN_SUCCESSFUL),
            ValidityOutcome::InvalidNotSynced => OutcomePayload::new(
                StatusCode::PRECONDITION_FAILED,
                format!("{NOT_SYNCED_PREFIX}{principal}"),
            ),
        }
    }

    /// Headers present on every login response.
    #[must_use]
    pub fn base_headers(session: &SessionBinding) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON_UTF8));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
        headers.insert(SET_COOKIE, session.set_cookie.clone());
        headers
    }

    /// Serialize `payload` into a body. A failed write leaves an empty body;
    /// status and headers are committed at that point and stay as they are.
    #[must_use]
    pub fn write(&self, payload: &OutcomePayload) -> Bytes {
        match self.serializer.serialize(payload) {
            Ok(body) => body,
            Err(e) => {
                info!(error = %e, "Error while writing JSON in HTTP response");
                Bytes::new()
            }
        }
    }

    /// Compose, write, and finish the response for `outcome`.
    pub async fn respond(
        &self,
        outcome: ValidityOutcome,
        principal: &str,
        shape: RequestShape,
        session: &SessionBinding,
    ) -> LoginResponse {
        let payload = Self::compose(outcome, principal);
        let status =
            StatusCode::from_u16(payload.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let headers = Self::base_headers(session);
        let body = self.write(&payload);

        let state = match outcome {
            ValidityOutcome::InvalidNotSynced => LoginState::RespondedRejected,
            ValidityOutcome::Valid => {
                debug!(
                    body = %String::from_utf8_lossy(&body),
                    "Sending login success response"
                );
                self.finish_success(shape, &session.session_id).await;
                LoginState::RespondedOk
            }
        };

        LoginResponse {
            state,
            status,
            headers,
            body,
        }
    }

    /// A programmatic client already has its answer in-band, so there is
    /// nothing left to redirect to.
    async fn finish_success(&self, shape: RequestShape, session_id: &str) {
        match shape {
            RequestShape::Programmatic => {
                if let Err(e) = self.sessions.clear_saved_request(session_id).await {
                    warn!(error = %e, "Failed to discard saved request");
                }
            }
            RequestShape::Interactive => {}
        }
    }
}
