//! Configuration for the login success module.

use serde::{Deserialize, Serialize};

/// Authentication method value under which principals must pre-exist.
pub const NO_PROVISIONING_METHOD: &str = "NONE";

/// Configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoginSuccessConfig {
    /// Authentication method in effect (`NONE`, `LDAP`, `AD`, `UNIX`, ...).
    ///
    /// Unknown principals are provisioned on demand unless this is `NONE`.
    pub authentication_method: String,

    /// Fallback page for AJAX logins. Unused while the JSON contract is in force.
    pub ajax_success_page: String,

    /// Name of the cookie carrying the session id.
    pub session_cookie_name: String,

    /// Mark the session cookie `Secure`. Turn off only for plain-HTTP development.
    pub session_cookie_secure: bool,
}

impl Default for LoginSuccessConfig {
    fn default() -> Self {
        Self {
            authentication_method: NO_PROVISIONING_METHOD.to_owned(),
            ajax_success_page: "/ajax_success.html".to_owned(),
            session_cookie_name: "SESSION".to_owned(),
            session_cookie_secure: true,
        }
    }
}

impl LoginSuccessConfig {
    /// Whether unknown principals may be provisioned just in time.
    #[must_use]
    pub fn provisioning_allowed(&self) -> bool {
        !self
            .authentication_method
            .trim()
            .eq_ignore_ascii_case(NO_PROVISIONING_METHOD)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_method_disables_provisioning() {
        assert!(!LoginSuccessConfig::default().provisioning_allowed());
    }

    #[test]
    fn sentinel_is_case_insensitive() {
        let cfg = LoginSuccessConfig {
            authentication_method: "none".to_owned(),
            ..LoginSuccessConfig::default()
        };
        assert!(!cfg.provisioning_allowed());

        let cfg = LoginSuccessConfig {
            authentication_method: "LDAP".to_owned(),
            ..LoginSuccessConfig::default()
        };
        assert!(cfg.provisioning_allowed());
    }

    #[test]
    fn session_cookie_is_secure_by_default() {
        let cfg: LoginSuccessConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.session_cookie_secure);
    }

    #[test]
    fn rejects_unknown_fields() {
        let res: Result<LoginSuccessConfig, _> =
            serde_json::from_str(r#"{"authentication_method":"LDAP","bogus":1}"#);
        assert!(res.is_err());
    }
}
