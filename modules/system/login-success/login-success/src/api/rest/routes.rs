use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use login_success_sdk::LoginSuccessClient;

use super::handlers;

pub const LOGIN_SUCCESS_PATH: &str = "/auth/v1/login/success";

/// Shared state of the login success handler.
#[derive(Clone)]
pub struct LoginSuccessState {
    pub client: Arc<dyn LoginSuccessClient>,
}

pub fn router(client: Arc<dyn LoginSuccessClient>) -> Router {
    Router::new()
        .route(LOGIN_SUCCESS_PATH, post(handlers::handle_login_success))
        .with_state(LoginSuccessState { client })
}
