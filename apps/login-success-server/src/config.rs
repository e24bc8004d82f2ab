//! Server configuration.
//!
//! Layered with `figment`: built-in defaults, then an optional YAML file,
//! then `LOGIN_SUCCESS__`-prefixed environment variables where `__` separates
//! nesting levels (`LOGIN_SUCCESS__SERVER__BIND_ADDR=0.0.0.0:9000`).

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use login_success::config::LoginSuccessConfig;
use serde::{Deserialize, Serialize};
use static_login_plugin::config::StaticLoginPluginConfig;

pub const ENV_PREFIX: &str = "LOGIN_SUCCESS__";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub login_success: LoginSuccessConfig,
    pub static_login_plugin: StaticLoginPluginConfig,
    pub upstream: UpstreamAuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of the human readable format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

/// Trusted upstream that has already verified credentials.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamAuthConfig {
    /// Header carrying the authenticated principal.
    pub header_name: String,
}

impl Default for UpstreamAuthConfig {
    fn default() -> Self {
        Self {
            header_name: "x-authenticated-user".to_owned(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, `path` (if any) and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or a value has the wrong
    /// shape.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        let cfg = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(cfg)
    }
}
