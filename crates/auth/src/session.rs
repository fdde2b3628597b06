//! Read-only identity snapshot handed in by the session provider.
//!
//! Every guard and evaluator call takes one of these explicitly; there is no
//! ambient "current user".

use serde::{Deserialize, Serialize};
use tracing::error;

use shopfloor_core::{TenantId, UserId};

use crate::authorize;
use crate::{Action, Resource, Role, ToPermission};

/// What to do with a persisted role name that is not in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRolePolicy {
    /// Fail loudly; a programming error should not reach a user.
    Panic,
    /// Keep the session but with no role, so every check denies.
    Deny,
}

impl Default for UnknownRolePolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Deny
        }
    }
}

fn resolve_role(role: Option<&str>, policy: UnknownRolePolicy) -> Option<Role> {
    match role.map(str::parse::<Role>).transpose() {
        Ok(role) => role,
        Err(err) => {
            error!(error = %err, ?policy, "persisted session carries an unknown role");
            match policy {
                UnknownRolePolicy::Panic => panic!("{err}"),
                UnknownRolePolicy::Deny => None,
            }
        }
    }
}

/// Stored form of a [`Session`], as read back from untrusted storage.
///
/// The role stays a raw string until [`PersistedSession::restore`] resolves it,
/// so a corrupted role goes through [`UnknownRolePolicy`] instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
}

impl PersistedSession {
    /// # Panics
    /// With [`UnknownRolePolicy::Panic`] when the stored role is not a known
    /// role name.
    pub fn restore(self, policy: UnknownRolePolicy) -> Session {
        Session {
            role: resolve_role(self.role.as_deref(), policy),
            is_authenticated: self.is_authenticated,
            user_id: self.user_id,
            tenant_id: self.tenant_id,
        }
    }
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self {
            role: session.role.map(|role| role.as_str().to_string()),
            is_authenticated: session.is_authenticated,
            user_id: session.user_id,
            tenant_id: session.tenant_id,
        }
    }
}

/// `{ role, is_authenticated }` plus the ids used for log correlation.
///
/// Serializes to the [`PersistedSession`] shape; restore through
/// [`PersistedSession::restore`] or [`Session::from_persisted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub role: Option<Role>,
    pub is_authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(role: Role) -> Self {
        Self {
            role: Some(role),
            is_authenticated: true,
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user_id: UserId, tenant_id: TenantId) -> Self {
        self.user_id = Some(user_id);
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Rebuild a session from a stored role name (e.g. browser storage).
    ///
    /// The input is untrusted. An unknown name is an `UnknownRole` error and
    /// is handled according to `policy`.
    ///
    /// # Panics
    /// With [`UnknownRolePolicy::Panic`] when `role` is not a known role name.
    pub fn from_persisted(
        role: Option<&str>,
        is_authenticated: bool,
        policy: UnknownRolePolicy,
    ) -> Self {
        Self {
            role: resolve_role(role, policy),
            is_authenticated,
            ..Self::default()
        }
    }

    /// The role that checks should use: only present while authenticated.
    pub fn effective_role(&self) -> Option<Role> {
        if self.is_authenticated { self.role } else { None }
    }

    pub fn can<P: ToPermission>(&self, permission: P) -> bool {
        authorize::can(self.effective_role(), permission)
    }

    pub fn can_any<I>(&self, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: ToPermission,
    {
        authorize::can_any(self.effective_role(), permissions)
    }

    pub fn can_all<I>(&self, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: ToPermission,
    {
        authorize::can_all(self.effective_role(), permissions)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        authorize::has_any_role(self.effective_role(), roles)
    }

    /// `true` if authenticated with a role at least as senior as `minimum`.
    pub fn is_at_least(&self, minimum: Role) -> bool {
        self.effective_role()
            .is_some_and(|role| role.is_at_least(minimum))
    }

    pub fn permissions_for_resource(&self, resource: Resource) -> Vec<Action> {
        authorize::permissions_for_resource(self.effective_role(), resource)
    }
}
