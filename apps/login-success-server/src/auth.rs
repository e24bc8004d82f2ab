//! Trusted-header authentication layer.
//!
//! Stands in front of the login success endpoint the way an SSO proxy does:
//! credentials were verified upstream and the principal arrives in a header.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::HeaderMap;
use http::header::{COOKIE, USER_AGENT};
use login_success_sdk::{AuthenticatedIdentity, RequestDetails};

/// Shared state for [`trusted_header_middleware`].
#[derive(Clone)]
pub struct TrustedHeaderState {
    pub header_name: Arc<str>,
    pub session_cookie_name: Arc<str>,
}

/// Place an [`AuthenticatedIdentity`] in the request extensions when the
/// trusted header names a principal. Requests without one pass through
/// untouched and the handler answers 401.
pub async fn trusted_header_middleware(
    State(state): State<TrustedHeaderState>,
    mut req: Request,
    next: Next,
) -> Response {
    let principal = req
        .headers()
        .get(state.header_name.as_ref())
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned);

    match principal {
        Some(principal) => {
            let details = request_details(&req, &state.session_cookie_name);
            match AuthenticatedIdentity::new(principal, details) {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                }
                Err(e) => tracing::debug!("Upstream identity rejected: {e}"),
            }
        }
        None => tracing::debug!(header = %state.header_name, "No upstream principal"),
    }

    next.run(req).await
}

fn request_details(req: &Request, cookie_name: &str) -> RequestDetails {
    let remote_address = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    RequestDetails {
        remote_address,
        session_id: session_cookie(req.headers(), cookie_name).unwrap_or_default(),
        user_agent,
    }
}

/// Value of the `cookie_name` cookie, if the request carries one.
fn session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_owned())
}
