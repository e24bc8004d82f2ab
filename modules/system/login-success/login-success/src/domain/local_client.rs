//! Local (in-process) client for the login success module.

use std::sync::Arc;

use async_trait::async_trait;
use login_success_sdk::{
    AuthenticatedIdentity, LoginResponse, LoginSuccessClient, LoginSuccessError, RequestShape,
};

use super::{DomainError, Service};

/// Local client wrapping the service.
pub struct LoginSuccessLocalClient {
    svc: Arc<Service>,
}

impl LoginSuccessLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> LoginSuccessError {
    tracing::error!(operation = op, error = ?e, "login_success call failed");
    e.into()
}

#[async_trait]
impl LoginSuccessClient for LoginSuccessLocalClient {
    async fn on_authentication_success(
        &self,
        identity: &mut AuthenticatedIdentity,
        shape: RequestShape,
    ) -> Result<LoginResponse, LoginSuccessError> {
        self.svc
            .on_authentication_success(identity, shape)
            .await
            .map_err(|e| log_and_convert("on_authentication_success", e))
    }
}
