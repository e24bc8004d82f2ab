#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod auth;
mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use login_success::infra::{JsonPayloadSerializer, TracingAuditSink};
use login_success::{Collaborators, LoginSuccessModule};
use static_login_plugin::StaticLoginPlugin;
use tracing_subscriber::EnvFilter;

use crate::auth::{TrustedHeaderState, trusted_header_middleware};
use crate::config::{AppConfig, LoggingConfig};

/// Login success server: confirms identities vouched for by a trusted
/// upstream and answers with the JSON login outcome.
#[derive(Parser, Debug)]
#[command(name = "login-success-server", version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref())?;

    init_logging(&cfg.logging);
    run(cfg).await
}

fn init_logging(cfg: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if cfg.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let plugin = StaticLoginPlugin::from_config(&cfg.static_login_plugin);
    let module = LoginSuccessModule::init(
        &cfg.login_success,
        Collaborators {
            directory: plugin.directory(),
            sessions: plugin.sessions(),
            audit_sink: Arc::new(TracingAuditSink),
            serializer: Arc::new(JsonPayloadSerializer),
        },
    )?;

    let auth_state = TrustedHeaderState {
        header_name: Arc::from(cfg.upstream.header_name.as_str()),
        session_cookie_name: Arc::from(cfg.login_success.session_cookie_name.as_str()),
    };
    Ok(module.router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        trusted_header_middleware,
    )))
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg)?;

    let addr: SocketAddr = cfg
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind_addr '{}'", cfg.server.bind_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Login success server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Login success server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Received Ctrl+C, shutting down");
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use axum::body::Body;
    use http::{Request, StatusCode};
    use login_success::api::rest::routes::LOGIN_SUCCESS_PATH;
    use tower::ServiceExt;

    use super::*;

    fn login(user: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(LOGIN_SUCCESS_PATH)
            .header("x-requested-with", "XMLHttpRequest");
        if let Some(user) = user {
            builder = builder.header("x-authenticated-user", user);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn cli_accepts_config_path() {
        let cli = Cli::try_parse_from(["login-success-server", "--config", "server.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("server.yaml")));
    }

    #[tokio::test]
    async fn seeded_user_logs_in() {
        let app = build_app(&AppConfig::default()).unwrap();

        let response = app.oneshot(login(Some("admin"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["msgDesc"], "Login Successful");
    }

    #[tokio::test]
    async fn unknown_user_rejected_under_default_method() {
        let app = build_app(&AppConfig::default()).unwrap();

        let response = app.oneshot(login(Some("mallory"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    }

    #[tokio::test]
    async fn anonymous_request_is_unauthorized() {
        let app = build_app(&AppConfig::default()).unwrap();

        let response = app.oneshot(login(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn invalid_cookie_name_fails_startup() {
        let mut cfg = AppConfig::default();
        cfg.login_success.session_cookie_name = "bad name".to_owned();
        assert!(build_app(&cfg).is_err());
    }
}
