//! Guard configuration.
//!
//! Read from the environment with defaults, or deserialized from the host
//! application's own config file.

use serde::{Deserialize, Serialize};

use shopfloor_auth::{PersistedSession, Session, UnknownRolePolicy};

use crate::error::{NavigationError, NavigationResult};

pub const LOGIN_PATH_VAR: &str = "SHOPFLOOR_LOGIN_PATH";
pub const UNAUTHORIZED_PATH_VAR: &str = "SHOPFLOOR_UNAUTHORIZED_PATH";
pub const UNKNOWN_ROLE_VAR: &str = "SHOPFLOOR_UNKNOWN_ROLE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where unauthenticated visitors are sent.
    pub login_path: String,
    /// Where authenticated but unauthorized visitors are sent when a guard
    /// has no fallback.
    pub unauthorized_path: String,
    pub unknown_role: UnknownRolePolicy,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            unauthorized_path: "/unauthorized".to_string(),
            unknown_role: UnknownRolePolicy::default(),
        }
    }
}

impl GuardConfig {
    /// Restore a stored session under this config's [`UnknownRolePolicy`].
    ///
    /// # Panics
    /// When the stored role is unknown and the policy is
    /// [`UnknownRolePolicy::Panic`].
    pub fn restore_session(&self, persisted: PersistedSession) -> Session {
        persisted.restore(self.unknown_role)
    }

    /// [`GuardConfig::restore_session`] straight from stored JSON.
    pub fn restore_session_json(&self, json: &str) -> NavigationResult<Session> {
        let persisted: PersistedSession = serde_json::from_str(json)?;
        Ok(self.restore_session(persisted))
    }

    /// Load from `SHOPFLOOR_*` environment variables, defaulting unset ones.
    pub fn from_env() -> NavigationResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GuardConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> NavigationResult<Self> {
        let defaults = Self::default();

        let login_path = lookup(LOGIN_PATH_VAR).unwrap_or(defaults.login_path);
        let unauthorized_path = lookup(UNAUTHORIZED_PATH_VAR).unwrap_or(defaults.unauthorized_path);
        let unknown_role = match lookup(UNKNOWN_ROLE_VAR).as_deref() {
            None => defaults.unknown_role,
            Some("panic") => UnknownRolePolicy::Panic,
            Some("deny") => UnknownRolePolicy::Deny,
            Some(other) => {
                return Err(NavigationError::Config(format!(
                    "{UNKNOWN_ROLE_VAR} must be 'panic' or 'deny', got '{other}'"
                )));
            }
        };

        for (var, path) in [
            (LOGIN_PATH_VAR, &login_path),
            (UNAUTHORIZED_PATH_VAR, &unauthorized_path),
        ] {
            if !path.starts_with('/') {
                return Err(NavigationError::Config(format!(
                    "{var} must be an absolute path, got '{path}'"
                )));
            }
        }

        Ok(Self {
            login_path,
            unauthorized_path,
            unknown_role,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let config = GuardConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = GuardConfig::from_lookup(lookup_from(&[
            (LOGIN_PATH_VAR, "/auth/sign-in"),
            (UNAUTHORIZED_PATH_VAR, "/403"),
            (UNKNOWN_ROLE_VAR, "deny"),
        ]))
        .unwrap();
        assert_eq!(config.login_path, "/auth/sign-in");
        assert_eq!(config.unauthorized_path, "/403");
        assert_eq!(config.unknown_role, UnknownRolePolicy::Deny);
    }

    #[test]
    fn bad_policy_is_rejected() {
        let err = GuardConfig::from_lookup(lookup_from(&[(UNKNOWN_ROLE_VAR, "ignore")]))
            .unwrap_err();
        assert!(err.to_string().contains("ignore"), "got: {err}");
    }

    #[test]
    fn relative_paths_are_rejected() {
        let err = GuardConfig::from_lookup(lookup_from(&[(LOGIN_PATH_VAR, "login")])).unwrap_err();
        assert!(matches!(err, NavigationError::Config(_)));
    }

    #[test]
    fn restore_session_applies_configured_policy() {
        let config = GuardConfig::from_lookup(lookup_from(&[(UNKNOWN_ROLE_VAR, "deny")])).unwrap();
        let session = config
            .restore_session_json(r#"{"role":"ROOT","is_authenticated":true}"#)
            .unwrap();
        assert!(session.is_authenticated);
        assert_eq!(session.role, None);

        let known = config
            .restore_session_json(r#"{"role":"WORKER","is_authenticated":true}"#)
            .unwrap();
        assert_eq!(known, Session::authenticated(shopfloor_auth::Role::Worker));
    }

    #[test]
    #[should_panic(expected = "unknown role 'ROOT'")]
    fn restore_session_panics_under_panic_policy() {
        let config = GuardConfig::from_lookup(lookup_from(&[(UNKNOWN_ROLE_VAR, "panic")])).unwrap();
        let _ = config.restore_session(PersistedSession {
            role: Some("ROOT".to_string()),
            is_authenticated: true,
            ..PersistedSession::default()
        });
    }

    #[test]
    fn restore_session_rejects_non_json() {
        let err = GuardConfig::default().restore_session_json("not json").unwrap_err();
        assert!(matches!(err, NavigationError::Json(_)));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: GuardConfig =
            serde_json::from_str(r#"{ "login_path": "/sso", "unknown_role": "deny" }"#).unwrap();
        assert_eq!(config.login_path, "/sso");
        assert_eq!(config.unauthorized_path, "/unauthorized");
        assert_eq!(config.unknown_role, UnknownRolePolicy::Deny);
    }
}
