use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use login_success_sdk::models::REQUESTED_WITH_HEADER;
use login_success_sdk::{AuthenticatedIdentity, LoginResponse, RequestShape};
use tracing::debug;

use super::error::{Problem, login_error_to_response};
use super::routes::LoginSuccessState;

/// Run the login success flow for the identity placed in the request
/// extensions by the authentication layer.
///
/// The (possibly revoked) identity is moved to the response extensions so
/// outer layers can see whether the session ended up trusted.
pub async fn handle_login_success(
    State(state): State<LoginSuccessState>,
    mut req: Request,
) -> Response {
    let Some(mut identity) = req.extensions_mut().remove::<AuthenticatedIdentity>() else {
        return Problem::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "No authenticated identity on request",
        )
        .into_response();
    };

    debug!(
        x_requested_with = ?req.headers().get(REQUESTED_WITH_HEADER),
        "Login success request"
    );
    let shape = RequestShape::from_headers(req.headers());

    match state
        .client
        .on_authentication_success(&mut identity, shape)
        .await
    {
        Ok(login) => {
            let mut response = into_http_response(login);
            response.extensions_mut().insert(identity);
            response
        }
        Err(err) => login_error_to_response(&err),
    }
}

/// Convert the transport-independent response into an axum response.
#[must_use]
pub fn into_http_response(login: LoginResponse) -> Response {
    let mut response = Response::new(Body::from(login.body));
    *response.status_mut() = login.status;
    *response.headers_mut() = login.headers;
    response.extensions_mut().insert(login.state);
    response
}
